//! Routine bodies parsed end to end through the public API

use crate::common::{frontend, main_routine, plain, words};
use cxfront::frontend::icode::IcodeUnit;
use cxfront::frontend::symtab::RoutineDescriptor;
use cxfront::frontend::types::TypeDescriptor;
use cxfront::util::config::ParserConfig;
use cxfront::util::diagnostic::{ErrorCode, Fatal};

const SUM_BODY: &str = "\
int k ;
total = 0 ;
for ( k = 0 ; k < count ; k ++ ) {
  if ( k == 3 ) continue_at = 1 ;
  else total += k ;
}
while ( ! done ) {
  do count -- ; while ( count > 0 )
  done = count == 0 ;
}
return ;";

#[test]
fn test_loop_body_with_recoverable_error() {
    let outcome = frontend(plain())
        .parse_body(&words(SUM_BODY), &main_routine())
        .unwrap();

    let codes: Vec<_> = outcome.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::UndefinedIdentifier, ErrorCode::UnexpectedToken]
    );
    let undefined = &outcome.diagnostics[0];
    assert_eq!(undefined.span.start.line, 4);
    assert_eq!(undefined.span.start.column, 17);

    assert_eq!(outcome.icode.pending_markers(), 0);
    assert_eq!(outcome.locals.len(), 1);
}

#[test]
fn test_every_marker_points_forward_into_the_stream() {
    let outcome = frontend(ParserConfig::default())
        .parse_body(&words(SUM_BODY), &main_routine())
        .unwrap();

    let units = outcome.icode.units();
    let targets: Vec<_> = units
        .iter()
        .enumerate()
        .filter_map(|(slot, unit)| match unit {
            IcodeUnit::LocationMarker(target) => Some((slot, *target)),
            _ => None,
        })
        .collect();

    // for: 4, if/else: 2, while: 1, do: 1
    assert_eq!(targets.len(), 8);
    for (slot, target) in targets {
        let target = target.expect("unresolved marker");
        assert!(target > slot && target <= units.len());
    }
}

#[test]
fn test_line_markers_follow_source_lines() {
    let outcome = frontend(ParserConfig::default())
        .parse_body(&words("total = 1 ;\n\n  count = 2 ;"), &main_routine())
        .unwrap();
    let lines: Vec<_> = outcome
        .icode
        .units()
        .iter()
        .filter_map(|unit| match unit {
            IcodeUnit::LineMarker(line) => Some(*line),
            _ => None,
        })
        .collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn test_return_type_is_checked_against_routine() {
    let routine = RoutineDescriptor::new("mean", TypeDescriptor::double());
    let outcome = frontend(plain())
        .parse_body(&words("if ( done ) return ratio ; return done ;"), &routine)
        .unwrap();
    let codes: Vec<_> = outcome.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::IncompatibleTypes]);
    assert_eq!(outcome.diagnostics[0].span.start.column, 35);
}

#[test]
fn test_std_iterator_body() {
    let routine = RoutineDescriptor::std_iterator("each", TypeDescriptor::void());
    let outcome = frontend(plain())
        .parse_body(&words("{ total += next ( ) ;"), &routine)
        .unwrap();
    assert!(!outcome.has_errors());

    let outcome = frontend(plain())
        .parse_body(&words("while ( done ) {\n  total ++ ;\n}"), &routine)
        .unwrap();
    assert!(!outcome.has_errors());
}

#[test]
fn test_includes_are_collected() {
    let outcome = frontend(plain())
        .parse_body(
            &words("# include \"io.cx\" ;\n# include \"math.cx\" ;\ntotal = 1 ;"),
            &main_routine(),
        )
        .unwrap();
    assert!(!outcome.has_errors());
    let paths: Vec<_> = outcome.includes.iter().map(|i| i.value.clone()).collect();
    assert_eq!(paths, vec!["io.cx", "math.cx"]);
    assert_eq!(outcome.includes[1].span.start.line, 2);
}

#[test]
fn test_switch_selector() {
    let outcome = frontend(plain())
        .parse_body(&words("switch ( ratio ) { total = 1 ; }"), &main_routine())
        .unwrap();
    let codes: Vec<_> = outcome.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::IncompatibleTypes]);
}

#[test]
fn test_error_flood_is_cut_off() {
    let config = ParserConfig {
        max_errors: 5,
        ..plain()
    };
    let src = ") ; ".repeat(20);
    let err = frontend(config)
        .parse_body(&words(&src), &main_routine())
        .unwrap_err();
    assert_eq!(err.fatal, Fatal::TooManyErrors { limit: 5 });
    assert_eq!(err.diagnostics.len(), 6);
    assert!(err.to_string().contains("6 error(s)"));
}

#[test]
fn test_long_body_overflows_code_segment() {
    let config = ParserConfig {
        code_segment_size: 64,
        ..plain()
    };
    let src = "total = total + 1 ; ".repeat(20);
    let err = frontend(config)
        .parse_body(&words(&src), &main_routine())
        .unwrap_err();
    assert_eq!(err.fatal, Fatal::CodeSegmentOverflow { capacity: 64 });
}

#[test]
fn test_frontend_is_reusable() {
    let mut frontend = frontend(plain());
    for _ in 0..3 {
        let outcome = frontend
            .parse_body(&words("int k = count ; total = k ;"), &main_routine())
            .unwrap();
        assert!(!outcome.has_errors());
    }
}
