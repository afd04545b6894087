//! Priority table and cooldown behaviour of the mode arbiter

use hand_gesture_control::{
    arbiter::{requested_mode, ControlMode, ModeArbiter, Transition},
    gesture::GestureFlags,
};
use proptest::prelude::*;

/// Every flag combination a debouncer can produce: flags of an absent hand
/// are always false.
fn all_flag_states() -> Vec<GestureFlags> {
    let mut states = Vec::new();
    for bits in 0u8..64 {
        let flags = GestureFlags {
            left_present: bits & 1 != 0,
            right_present: bits & 2 != 0,
            left_pinched: bits & 4 != 0,
            right_pinched: bits & 8 != 0,
            left_open_palm: bits & 16 != 0,
            right_fist: bits & 32 != 0,
        };
        let consistent = (flags.left_present || !(flags.left_pinched || flags.left_open_palm))
            && (flags.right_present || !(flags.right_pinched || flags.right_fist));
        if consistent {
            states.push(flags);
        }
    }
    states
}

fn expected(flags: &GestureFlags) -> ControlMode {
    if flags.left_pinched && flags.right_pinched {
        ControlMode::Zoom
    } else if flags.right_pinched {
        ControlMode::Drag
    } else if flags.right_fist {
        ControlMode::Rotate
    } else if flags.left_open_palm {
        ControlMode::Pan
    } else if flags.right_present {
        ControlMode::Hover
    } else {
        ControlMode::Idle
    }
}

#[test]
fn test_priority_table_exhaustive() {
    let states = all_flag_states();
    // Five states per hand: absent, or present with any two flags
    assert_eq!(states.len(), 25);
    for flags in states {
        assert_eq!(requested_mode(&flags), expected(&flags), "flags: {flags:?}");
    }
}

#[test]
fn test_every_mode_reachable() {
    let reached: Vec<ControlMode> = all_flag_states().iter().map(requested_mode).collect();
    for mode in ControlMode::ALL {
        assert!(reached.contains(&mode), "{mode} unreachable");
    }
}

#[test]
fn test_zoom_beats_everything() {
    let flags = GestureFlags {
        left_present: true,
        right_present: true,
        left_pinched: true,
        right_pinched: true,
        left_open_palm: true,
        right_fist: true,
    };
    assert_eq!(requested_mode(&flags), ControlMode::Zoom);
}

#[test]
fn test_pan_without_right_hand() {
    let flags = GestureFlags {
        left_present: true,
        left_open_palm: true,
        ..GestureFlags::default()
    };
    assert_eq!(requested_mode(&flags), ControlMode::Pan);
}

#[test]
fn test_first_request_accepted_immediately() {
    let mut arbiter = ModeArbiter::new(220.0);
    assert_eq!(
        arbiter.request(ControlMode::Hover, 5.0),
        Some(Transition {
            from: ControlMode::Idle,
            to: ControlMode::Hover
        })
    );
}

#[test]
fn test_cooldown_drops_not_queues() {
    let mut arbiter = ModeArbiter::new(220.0);
    arbiter.request(ControlMode::Hover, 0.0);

    assert!(arbiter.request(ControlMode::Drag, 100.0).is_none());
    assert_eq!(arbiter.mode(), ControlMode::Hover);

    // The dropped DRAG is not replayed later
    assert!(arbiter.request(ControlMode::Hover, 300.0).is_none());
    assert_eq!(arbiter.mode(), ControlMode::Hover);
}

#[test]
fn test_cooldown_boundary() {
    let mut arbiter = ModeArbiter::new(220.0);
    arbiter.request(ControlMode::Hover, 1000.0);
    assert!(arbiter.in_cooldown(1219.9));
    assert!(!arbiter.in_cooldown(1220.0));
    assert!(arbiter.request(ControlMode::Drag, 1220.0).is_some());
}

#[test]
fn test_same_mode_request_does_not_restart_cooldown() {
    let mut arbiter = ModeArbiter::new(220.0);
    arbiter.request(ControlMode::Hover, 0.0);
    arbiter.request(ControlMode::Hover, 200.0);
    assert!(arbiter.request(ControlMode::Drag, 220.0).is_some());
}

#[test]
fn test_reset_clears_cooldown() {
    let mut arbiter = ModeArbiter::new(220.0);
    arbiter.request(ControlMode::Drag, 0.0);
    arbiter.reset();
    assert_eq!(arbiter.mode(), ControlMode::Idle);
    assert!(arbiter.request(ControlMode::Hover, 1.0).is_some());
}

proptest! {
    /// Accepted transitions are always at least one cooldown apart
    #[test]
    fn prop_transitions_respect_cooldown(
        requests in prop::collection::vec((0usize..6, 1.0f64..150.0), 1..80)
    ) {
        let mut arbiter = ModeArbiter::new(220.0);
        let mut now = 0.0;
        let mut last_accept: Option<f64> = None;

        for (mode_idx, step) in requests {
            now += step;
            let before = arbiter.mode();
            let requested = ControlMode::ALL[mode_idx];
            if let Some(t) = arbiter.request(requested, now) {
                prop_assert_eq!(t.from, before);
                prop_assert_eq!(t.to, requested);
                if let Some(last) = last_accept {
                    prop_assert!(now - last >= 220.0);
                }
                last_accept = Some(now);
            }
            prop_assert!(arbiter.mode() == before || arbiter.mode() == requested);
        }
    }
}
