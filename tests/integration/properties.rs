//! Separator tolerance and marker balance over generated bodies

use crate::common::{frontend, main_routine, plain, words};
use cxfront::frontend::icode::IcodeUnit;
use cxfront::frontend::tokens::TokenKind;
use proptest::prelude::*;

fn statement_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "total = total + count",
        "count --",
        "while ( count > 0 ) count --",
        "if ( done ) total = 0 else total = 1",
        "do total ++ ; while ( total < 10 )",
        "for ( count = 0 ; count < 3 ; count ++ ) { total += count ; }",
        "{ ratio = ratio * 2 ; done = ratio > 1.5 }",
        "return",
    ])
}

fn without_separators(units: &[IcodeUnit]) -> Vec<IcodeUnit> {
    units
        .iter()
        .filter(|u| !matches!(u, IcodeUnit::Token(TokenKind::Semicolon)))
        .cloned()
        .collect()
}

proptest! {
    #[test]
    fn extra_separators_only_add_separators(
        statements in prop::collection::vec(statement_strategy(), 1..8),
        extra in prop::collection::vec(0usize..3, 8),
    ) {
        let single = statements.join(" ; ");
        let padded: String = statements
            .iter()
            .zip(&extra)
            .map(|(s, n)| format!("{} ;{}", s, " ;".repeat(*n)))
            .collect::<Vec<_>>()
            .join(" ");

        let a = frontend(plain()).parse_body(&words(&single), &main_routine()).unwrap();
        let b = frontend(plain()).parse_body(&words(&padded), &main_routine()).unwrap();

        prop_assert!(!a.has_errors(), "{}", single);
        prop_assert!(!b.has_errors(), "{}", padded);
        prop_assert_eq!(a.icode.pending_markers(), 0);
        prop_assert_eq!(b.icode.pending_markers(), 0);

        // Marker targets shift with the separators, so compare shapes only
        let shape = |units: &[IcodeUnit]| -> Vec<IcodeUnit> {
            without_separators(units)
                .into_iter()
                .map(|u| match u {
                    IcodeUnit::LocationMarker(target) => IcodeUnit::LocationMarker(target.map(|_| 0)),
                    other => other,
                })
                .collect()
        };
        prop_assert_eq!(shape(a.icode.units()), shape(b.icode.units()));
    }
}
