//! Statement parser tests


use crate::frontend::icode::{Icode, IcodeUnit};
use crate::frontend::symtab::{RoutineDescriptor, SymbolNode};
use crate::frontend::testing::words;
use crate::frontend::tokens::TokenKind;
use crate::frontend::types::TypeDescriptor;
use crate::frontend::{BodyError, Frontend, ParseOutcome};
use crate::util::config::ParserConfig;
use crate::util::diagnostic::ErrorCode;

/// Front end with a few variables in scope and line markers off
pub(super) fn frontend() -> Frontend {
    frontend_with(ParserConfig {
        line_markers: false,
        ..ParserConfig::default()
    })
}

pub(super) fn frontend_with(config: ParserConfig) -> Frontend {
    let mut frontend = Frontend::with_config(config);
    let symbols = frontend.symbols_mut();
    for (name, ty) in [
        ("i", TypeDescriptor::integer()),
        ("n", TypeDescriptor::integer()),
        ("x", TypeDescriptor::double()),
        ("c", TypeDescriptor::char()),
        ("flag", TypeDescriptor::boolean()),
        ("name", TypeDescriptor::array(TypeDescriptor::char(), 8)),
    ] {
        symbols
            .enter_local(SymbolNode::variable(name, ty))
            .unwrap();
    }
    symbols.define_enum("color", &["red", "green", "blue"]).unwrap();
    symbols
        .enter_local(SymbolNode::variable(
            "hue",
            TypeDescriptor::enumeration("color", &["red", "green", "blue"]),
        ))
        .unwrap();
    symbols
        .enter_local(SymbolNode::routine(RoutineDescriptor::new(
            "twice",
            TypeDescriptor::integer(),
        )))
        .unwrap();
    frontend
}

pub(super) fn void_routine() -> RoutineDescriptor {
    RoutineDescriptor::new("main", TypeDescriptor::void())
}

pub(super) fn try_parse_in(
    src: &str,
    routine: &RoutineDescriptor,
) -> Result<ParseOutcome, BodyError> {
    frontend().parse_body(&words(src), routine)
}

pub(super) fn parse_in(
    src: &str,
    routine: &RoutineDescriptor,
) -> ParseOutcome {
    try_parse_in(src, routine).unwrap()
}

pub(super) fn parse(src: &str) -> ParseOutcome {
    parse_in(src, &void_routine())
}

/// Codes of every reported error, in order
pub(super) fn codes(outcome: &ParseOutcome) -> Vec<ErrorCode> {
    outcome.diagnostics.iter().map(|d| d.code).collect()
}

/// Recorded tokens as source text, markers as `@`
pub(super) fn rendered(icode: &Icode) -> Vec<String> {
    icode
        .units()
        .iter()
        .map(|unit| match unit {
            IcodeUnit::Token(kind) => kind.to_string(),
            IcodeUnit::LineMarker(line) => format!(".{}", line),
            IcodeUnit::LocationMarker(_) => "@".to_string(),
        })
        .collect()
}

/// `(slot, target)` of every location marker
pub(super) fn markers(icode: &Icode) -> Vec<(usize, usize)> {
    icode
        .marker_slots()
        .into_iter()
        .map(|slot| {
            let target = icode
                .location_of(slot)
                .unwrap_or_else(|| panic!("marker @{} never fixed up", slot));
            (slot, target)
        })
        .collect()
}

/// Position of the first recorded `kind`
pub(super) fn position_of(
    icode: &Icode,
    kind: &TokenKind,
) -> usize {
    icode
        .find_token(kind, 0)
        .unwrap_or_else(|| panic!("`{}` not recorded", kind))
}
