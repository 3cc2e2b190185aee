//! Laws tying the splitter, the locator and the classifier together.
use crate::sql::*;
use rstest::rstest;

const BUFFERS: [&str; 10] = [
    "",
    "SELECT 1",
    "SELECT 1; SELECT 2",
    "SELECT 1;; SELECT 2;",
    "SELECT ';' AS semi; SELECT \"a;b\" FROM t",
    "SELECT 'it''s a test'; SELECT 2",
    "SELECT 1; -- comment with ; semicolon\nSELECT 2",
    "SELECT /* ; */ 1;\n\n  UPDATE t SET a = 'x\\';y' ;  ",
    "SELECT 1; /* unclosed ; comment",
    "SELECT 'é;ü'; SELECT 'ß' ; ;",
];

/// Every character boundary of `text`, end included.
fn offsets(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
}

#[rstest]
fn locate_agrees_with_split(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9)] index: usize) {
    let text = BUFFERS[index];
    let statements = split(text);
    for offset in offsets(text) {
        if let Some(found) = locate(text, offset) {
            assert!(
                statements.contains(&found),
                "locate({text:?}, {offset}) = {found:?} is not one of {statements:?}"
            );
        }
    }
}

#[rstest]
fn every_statement_is_locatable(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9)] index: usize) {
    let text = BUFFERS[index];
    for stmt in split_statements(text) {
        for offset in stmt.start..=stmt.end {
            if !text.is_char_boundary(offset) {
                continue;
            }
            assert_eq!(
                locate_statement(text, offset).as_ref(),
                Some(&stmt),
                "offset {offset} in {text:?}"
            );
        }
    }
}

#[rstest]
fn split_is_idempotent(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9)] index: usize) {
    for stmt in split(BUFFERS[index]) {
        assert_eq!(split(&stmt), vec![stmt.clone()]);
    }
}

#[rstest]
fn split_never_yields_blank_statements(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9)] index: usize) {
    for stmt in split(BUFFERS[index]) {
        assert!(!stmt.trim().is_empty());
        assert_eq!(stmt.trim(), stmt);
    }
}

#[rstest]
fn analyze_accepts_any_offset(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9)] index: usize) {
    let text = BUFFERS[index];
    for offset in 0..=text.len() + 2 {
        let context = analyze(text, offset);
        match context.kind {
            SqlContextType::AfterDot => assert!(context.preceding_word.is_some()),
            SqlContextType::InFunction => assert!(context.function_name.is_some()),
            _ => {
                assert!(context.preceding_word.is_none());
                assert!(context.function_name.is_none());
            }
        }
    }
}

#[test]
fn statements_rejoin_to_equivalent_script() {
    let text = "SELECT 1;; SELECT ';' ; -- tail\nSELECT 3";
    let rejoined = split(text).join(";");
    assert_eq!(split(&rejoined), split(text));
}

#[rstest]
fn scan_tracing_leaves_results_unchanged(
    #[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9)] index: usize,
) {
    crate::testing::common_init();
    let text = BUFFERS[index];
    let quiet = crate::Config::default();
    let traced = crate::Config {
        trace_scans: true,
        ..crate::Config::default()
    };

    assert_eq!(
        splitter::split_statements_with(text, &traced),
        splitter::split_statements_with(text, &quiet)
    );
    assert_eq!(
        alias::resolve_aliases_with(text, &traced),
        alias::resolve_aliases_with(text, &quiet)
    );
    for offset in offsets(text) {
        assert_eq!(
            locator::locate_statement_with(text, offset, &traced),
            locator::locate_statement_with(text, offset, &quiet)
        );
        assert_eq!(
            context::analyze_with(text, offset, &traced),
            context::analyze_with(text, offset, &quiet)
        );
    }
}
