//! Property: every mutation operator is idempotent under its marker and
//! never mutates its input.

use evod_mutation::MutationOperator;
use proptest::prelude::*;

fn arb_operator() -> impl Strategy<Value = MutationOperator> {
    prop_oneof![
        Just(MutationOperator::WidenWorkgroup),
        Just(MutationOperator::VectorizeAccumulator),
        Just(MutationOperator::UnrollInnerLoop),
        Just(MutationOperator::CoalesceMemoryAccess),
        Just(MutationOperator::HoistInvariantLoad),
        Just(MutationOperator::FuseMultiplyAdd),
    ]
}

/// Kernel-ish source: fragments the operators know how to rewrite mixed with
/// arbitrary filler lines.
fn arb_source() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("@compute @workgroup_size(64)".to_string()),
        Just("fn main() {".to_string()),
        Just("var acc: f32 = 0.0;".to_string()),
        Just("for (var i: u32 = 0u; i < n; i = i + 1u) {".to_string()),
        Just("acc = acc + a * b;".to_string()),
        Just("out[row * stride + i] = acc;".to_string()),
        Just("}".to_string()),
        "[a-z ]{0,30}",
    ];
    prop::collection::vec(fragment, 1..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn apply_twice_equals_apply_once(op in arb_operator(), source in arb_source()) {
        let once = op.apply(&source);
        let twice = op.apply(&once);
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn input_is_never_modified(op in arb_operator(), source in arb_source()) {
        let before = source.clone();
        let _ = op.apply(&source);
        prop_assert_eq!(before, source);
    }

    #[test]
    fn marker_is_always_present_after_apply(op in arb_operator(), source in arb_source()) {
        let mutated = op.apply(&source);
        prop_assert!(mutated.contains(op.marker()));
    }

    #[test]
    fn operators_commute_on_markers(
        a in arb_operator(),
        b in arb_operator(),
        source in arb_source(),
    ) {
        // Whatever the order, both markers end up present exactly once.
        let ab = b.apply(&a.apply(&source));
        prop_assert_eq!(ab.matches(a.marker()).count(), 1);
        prop_assert_eq!(ab.matches(b.marker()).count(), 1);
    }
}
