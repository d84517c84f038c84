//! Welcome-text greetings and the cycling order they are shown in.

/// One localized welcome greeting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Greeting {
    pub lang: String,
    pub text: String,
}

impl Greeting {
    pub fn new(lang: &str, text: &str) -> Self {
        Self {
            lang: lang.to_owned(),
            text: text.to_owned(),
        }
    }
}

/// Served when the language document cannot be fetched or parses empty.
pub fn fallback_greetings() -> Vec<Greeting> {
    [
        ("en", "Hello"),
        ("es", "Hola"),
        ("fr", "Bonjour"),
        ("de", "Hallo"),
        ("it", "Ciao"),
        ("pt", "Olá"),
        ("ja", "こんにちは"),
        ("zh", "你好"),
        ("ru", "Привет"),
        ("ar", "مرحبا"),
        ("hi", "नमस्ते"),
        ("ko", "안녕하세요"),
    ]
    .into_iter()
    .map(|(lang, text)| Greeting::new(lang, text))
    .collect()
}

/// Wrap-around cursor over the greeting list.
#[derive(Clone, Debug)]
pub struct GreetingCarousel {
    items: Vec<Greeting>,
    index: usize,
}

impl GreetingCarousel {
    /// An empty list falls back to the built-in greetings.
    pub fn new(items: Vec<Greeting>) -> Self {
        let items = if items.is_empty() {
            fallback_greetings()
        } else {
            items
        };
        Self { items, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> &Greeting {
        &self.items[self.index]
    }

    pub fn advance(&mut self) -> &Greeting {
        self.index = (self.index + 1) % self.items.len();
        &self.items[self.index]
    }
}
