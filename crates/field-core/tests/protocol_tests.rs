// Worker protocol validation and the fallback path it feeds.

use field_core::protocol::{
    decode_reply, encode_request, ProtocolError, WorkerReply, WorkerRequest,
};
use field_core::{Bounds, DelegationLink, DelegationState, FieldConfig, NeuronField};

fn bounds() -> Bounds {
    Bounds::new(800.0, 600.0)
}

fn small_field(seed: u64) -> NeuronField {
    let cfg = FieldConfig {
        population: (4, 4),
        ..FieldConfig::default()
    };
    NeuronField::new(cfg, bounds(), seed)
}

#[test]
fn requests_carry_the_expected_wire_tags() {
    let field = small_field(1);
    let init = encode_request(&WorkerRequest::Init {
        width: 800.0,
        height: 600.0,
        agents: field.seeds(),
    })
    .unwrap();
    assert!(init.contains("\"type\":\"init\""));
    assert!(init.contains("\"agents\""));

    let update = encode_request(&WorkerRequest::Update {
        width: 800.0,
        height: 600.0,
    })
    .unwrap();
    assert!(update.contains("\"type\":\"update\""));
}

#[test]
fn length_mismatch_is_rejected_and_fallback_is_terminal() {
    let mut field = small_field(2);
    let mut states = field.states();
    states.pop();

    let err = field.apply_states(&states).unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::PopulationMismatch {
            expected: 4,
            got: 3
        }
    ));

    let mut link = DelegationLink::new();
    assert!(link.mark_delegated());
    link.mark_failed(&err.to_string());
    assert_eq!(link.state(), DelegationState::LocalFallback);

    // Fallback never re-attempts delegation.
    assert!(!link.mark_delegated());
    link.mark_failed("again");
    assert_eq!(link.state(), DelegationState::LocalFallback);
    assert!(!link.is_delegated());
}

#[test]
fn reply_missing_x_is_malformed_and_local_stepping_continues() {
    let mut field = small_field(3);
    let reply = WorkerReply {
        agents: field.states(),
    };
    let mut value = serde_json::to_value(&reply).unwrap();
    value["agents"][3]
        .as_object_mut()
        .unwrap()
        .remove("x")
        .unwrap();
    let text = value.to_string();

    let err = decode_reply(&text).unwrap_err();
    assert!(matches!(err, ProtocolError::Malformed(_)));

    let mut link = DelegationLink::new();
    link.mark_delegated();
    link.mark_failed(&err.to_string());
    assert_eq!(link.state(), DelegationState::LocalFallback);

    // With the worker out of the loop, positions still evolve locally.
    let before: Vec<_> = field.agents().iter().map(|a| a.pos).collect();
    for _ in 0..5 {
        field.step(bounds());
    }
    let moved = field
        .agents()
        .iter()
        .zip(&before)
        .any(|(a, prev)| a.pos != *prev);
    assert!(moved, "agents froze after fallback");
}

#[test]
fn non_finite_fields_are_rejected() {
    let mut field = small_field(4);
    let mut states = field.states();
    states[2].x = f32::NAN;
    let err = field.apply_states(&states).unwrap_err();
    assert!(matches!(err, ProtocolError::NonFinite { .. }));
}

#[test]
fn oversized_trails_are_rejected() {
    let mut field = small_field(5);
    let mut states = field.states();
    states[0].trail = vec![[0.0, 0.0]; 23];
    let err = field.apply_states(&states).unwrap_err();
    assert!(matches!(err, ProtocolError::TrailOverflow { .. }));
}

#[test]
fn unknown_ids_are_rejected() {
    let mut field = small_field(6);
    let mut states = field.states();
    states[0].id = 9999;
    let err = field.apply_states(&states).unwrap_err();
    assert!(matches!(err, ProtocolError::UnknownAgent { id: 9999 }));
}

#[test]
fn rejected_replies_leave_the_population_untouched() {
    let mut field = small_field(7);
    let before: Vec<_> = field.agents().iter().map(|a| a.pos).collect();

    let mut states = field.states();
    states[3].y = f32::INFINITY;
    assert!(field.apply_states(&states).is_err());

    let after: Vec<_> = field.agents().iter().map(|a| a.pos).collect();
    assert_eq!(before, after);
}

#[test]
fn applied_replies_mirror_the_worker_population() {
    let mut primary = small_field(8);
    let cfg = FieldConfig {
        population: (4, 4),
        ..FieldConfig::default()
    };
    let mut worker_side = NeuronField::from_seeds(cfg, bounds(), 99, &primary.seeds());

    worker_side.step(bounds());
    worker_side.step(bounds());
    primary.apply_states(&worker_side.states()).unwrap();

    for (a, b) in primary.agents().iter().zip(worker_side.agents()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.size, b.size);
        // Depth came from the seeds and is never overwritten.
        assert_eq!(a.depth(), b.depth());
    }
}
