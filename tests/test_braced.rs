mod common;

use bracetree::braced::{BracedParser, WriteError, to_braced};
use bracetree::model::{BinaryTree, FnCodec, Side, TextCodec};
use bracetree::parser::ParsingErrorType;
use bracetree::{parse_braced_file, parse_braced_str, to_braced_string, write_braced_file};
use common::{EXAMPLE_BRACED, example_tree, init_test_setup, pre_order_payloads};
use rstest::rstest;
use tempfile::TempDir;

/// Pre-order listing of (payload, side) pairs, capturing the full shape of a tree
fn shape<T: Clone>(tree: &BinaryTree<T>) -> Vec<(T, Option<Side>)> {
    tree.pre_order_iter()
        .map(|(id, node)| (node.payload().clone(), tree.side_of(id).unwrap()))
        .collect()
}

// --- ENCODING ---
#[test]
fn test_encode_example_tree() {
    init_test_setup();
    let tree = example_tree();
    assert_eq!(to_braced_string(&tree).unwrap(), EXAMPLE_BRACED);
}

#[test]
fn test_encode_marks_missing_left_child_only() {
    let mut tree = BinaryTree::new("a".to_string());
    let root = tree.root();
    let b = tree.attach_right(root, "b".to_string()).unwrap();
    tree.attach_left(b, "c".to_string()).unwrap();

    assert_eq!(to_braced_string(&tree).unwrap(), "{ \"a\" $ { \"b\" { \"c\" } } }");
}

#[test]
fn test_encode_rejects_reserved_characters() {
    for payload in ["{", "}", "say \"hi\"", "$"] {
        let tree = BinaryTree::new(payload.to_string());
        let err = to_braced_string(&tree).unwrap_err();
        assert!(matches!(err, WriteError::ReservedCharacter { .. }), "accepted {payload:?}");
    }
}

// --- DECODING ---
#[test]
fn test_decode_example_tree() {
    init_test_setup();
    let tree: BinaryTree<u32> = parse_braced_str(EXAMPLE_BRACED).unwrap();

    assert_eq!(tree.size(), 8);
    assert!(tree.is_valid());
    assert_eq!(shape(&tree), shape(&example_tree()));

    // 6 has only a right child
    let root = tree.root();
    let three = tree.right(root).unwrap().unwrap();
    let six = tree.left(three).unwrap().unwrap();
    assert_eq!(tree.payload(six).unwrap(), &6);
    assert_eq!(tree.left(six).unwrap(), None);
    assert_eq!(tree.payload(tree.right(six).unwrap().unwrap()).unwrap(), &8);
}

#[rstest]
#[case("{ \"1\" { \"2\" } }", Side::Left)]
#[case("{ \"1\" $ { \"2\" } }", Side::Right)]
fn test_decode_single_child_side(#[case] braced: &str, #[case] side: Side) {
    let tree: BinaryTree<u8> = parse_braced_str(braced).unwrap();
    let root = tree.root();

    let child = tree.node(root).unwrap().child(side).unwrap();
    assert_eq!(tree.payload(child).unwrap(), &2);
    assert_eq!(tree.node(root).unwrap().child(side.opposite()), None);
    assert_eq!(tree.size(), 2);
}

#[test]
fn test_decode_leaf_root() {
    let tree: BinaryTree<String> = parse_braced_str("{ \"Tui\" }").unwrap();
    assert_eq!(tree.size(), 1);
    assert_eq!(tree.payload(tree.root()).unwrap(), "Tui");
}

#[test]
fn test_decode_nested_right_only() {
    let tree: BinaryTree<String> = parse_braced_str("{ \"a\" $ { \"b\" $ { \"c\" } } }").unwrap();
    assert_eq!(
        shape(&tree),
        vec![
            ("a".to_string(), None),
            ("b".to_string(), Some(Side::Right)),
            ("c".to_string(), Some(Side::Right)),
        ]
    );
}

#[test]
fn test_decode_accepts_any_whitespace() {
    let braced = "{\n  \"1\"\n  {\"2\"}\n  {\t\"3\"  }\n}\n";
    let tree: BinaryTree<u8> = parse_braced_str(braced).unwrap();
    assert_eq!(pre_order_payloads(&tree), vec![1, 2, 3]);
}

#[rstest]
#[case("", ParsingErrorType::MissingOpeningBrace)]
#[case("   \"a\" ", ParsingErrorType::MissingOpeningBrace)]
#[case("{ \"a\" { \"b\" }", ParsingErrorType::UnbalancedBraces)]
#[case("{ \"a }", ParsingErrorType::UnterminatedQuote)]
#[case("{ a }", ParsingErrorType::ExpectedPayload)]
#[case("{ }", ParsingErrorType::ExpectedPayload)]
#[case("{ \"a\" $ }", ParsingErrorType::DanglingMarker)]
#[case("{ \"a\" } { \"b\" }", ParsingErrorType::TrailingContent)]
#[case("{ \"a\" } }", ParsingErrorType::TrailingContent)]
#[case("{ \"a\" $ { \"b\" } { \"c\" } }", ParsingErrorType::UnexpectedContent)]
#[case("{ \"a\" { \"b\" } { \"c\" } { \"d\" } }", ParsingErrorType::UnexpectedContent)]
#[case("{ \"a\" \"zzz\" garbage { \"b\" } }", ParsingErrorType::UnexpectedContent)]
#[case("{ \"a\" { \"b\" } $ }", ParsingErrorType::UnexpectedContent)]
#[case("{ \"a\" $ $ { \"b\" } }", ParsingErrorType::UnexpectedContent)]
fn test_decode_malformed(#[case] braced: &str, #[case] expected: ParsingErrorType) {
    let err = parse_braced_str::<String, _>(braced).unwrap_err();
    assert_eq!(err.kind(), &expected);
}

#[test]
fn test_error_reports_position() {
    let err = parse_braced_str::<String, _>("{ \"a\" }  trailing").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::TrailingContent);
    assert_eq!(err.position(), 9);
    assert_eq!(err.context(), "trailing");
}

#[test]
fn test_decode_rejected_payload() {
    let err = parse_braced_str::<u32, _>("{ \"1\" { \"two\" } }").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::PayloadRejected(_)));
    assert_eq!(err.position(), 9);
}

/// Left chain of `depth` nodes, all holding `n`
fn left_chain_text(depth: usize) -> String {
    format!("{}{}", "{ \"n\" ".repeat(depth), "} ".repeat(depth))
}

#[test]
fn test_decode_depth_limit() {
    let braced = left_chain_text(60);

    let parser = BracedParser::new(TextCodec::<String>::new()).with_max_depth(50);
    let err = parser.parse_str(&braced).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::NestingTooDeep(50));

    let tree = BracedParser::new(TextCodec::<String>::new()).parse_str(&braced).unwrap();
    assert_eq!(tree.size(), 60);
    assert_eq!(tree.depth(), 60);
}

#[test]
fn test_decode_exactly_at_depth_limit() {
    let parser = BracedParser::new(TextCodec::<String>::new()).with_max_depth(1024);

    let tree = parser.parse_str(left_chain_text(1024)).unwrap();
    assert_eq!(tree.depth(), 1024);

    let err = parser.parse_str(left_chain_text(1025)).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::NestingTooDeep(1024));
}

#[test]
fn test_decode_deep_chain_without_limit() {
    init_test_setup();
    let tree: BinaryTree<String> = parse_braced_str(left_chain_text(20_000)).unwrap();
    assert_eq!(tree.size(), 20_000);
    assert_eq!(tree.depth(), 20_000);
    assert!(tree.is_valid());
}

#[test]
fn test_unexpected_content_position() {
    let err = parse_braced_str::<String, _>("{ \"a\" \"zzz\" { \"b\" } }").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedContent);
    assert_eq!(err.position(), 6);
    assert!(err.context().starts_with("\"zzz\""));
}

// --- ROUND TRIPS ---
#[test]
fn test_round_trip_preserves_text() {
    init_test_setup();
    let tree: BinaryTree<u32> = parse_braced_str(EXAMPLE_BRACED).unwrap();
    assert_eq!(to_braced_string(&tree).unwrap(), EXAMPLE_BRACED);
}

#[rstest]
#[case(vec!["Great Spotted Kiwi", "", "Kākāpō"])]
#[case(vec!["  padded  ", "tab\tinside", "new\nline"])]
fn test_round_trip_payload_text(#[case] payloads: Vec<&str>) {
    let mut tree = BinaryTree::new(payloads[0].to_string());
    let root = tree.root();
    let right = tree.attach_right(root, payloads[1].to_string()).unwrap();
    tree.attach_right(right, payloads[2].to_string()).unwrap();

    let braced = to_braced_string(&tree).unwrap();
    let decoded: BinaryTree<String> = parse_braced_str(&braced).unwrap();
    assert_eq!(shape(&decoded), shape(&tree));
}

#[test]
fn test_round_trip_after_mutation() {
    let mut tree = example_tree();
    let root = tree.root();
    let two = tree.left(root).unwrap().unwrap();
    tree.delete_subtree(two).unwrap();

    let braced = to_braced_string(&tree).unwrap();
    assert_eq!(braced, "{ \"1\" $ { \"3\" { \"6\" $ { \"8\" } } { \"7\" } } }");

    let decoded: BinaryTree<u32> = parse_braced_str(&braced).unwrap();
    assert_eq!(shape(&decoded), shape(&tree));
}

#[test]
fn test_round_trip_deep_right_chain() {
    let mut tree = BinaryTree::new(0u32);
    let mut tip = tree.root();
    for payload in 1..1100 {
        tip = tree.attach_right(tip, payload).unwrap();
    }

    let braced = to_braced_string(&tree).unwrap();
    assert!(braced.starts_with("{ \"0\" $ { \"1\" $ {"));

    let decoded: BinaryTree<u32> = parse_braced_str(&braced).unwrap();
    assert_eq!(decoded.size(), 1100);
    assert_eq!(decoded.depth(), 1100);
    assert_eq!(shape(&decoded), shape(&tree));
}

#[test]
fn test_write_display_only_payload() {
    struct Moa(u8);

    impl std::fmt::Display for Moa {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "moa-{}", self.0)
        }
    }

    let mut tree = BinaryTree::new(Moa(1));
    let root = tree.root();
    tree.attach_right(root, Moa(2)).unwrap();
    assert_eq!(to_braced_string(&tree).unwrap(), "{ \"moa-1\" $ { \"moa-2\" } }");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moa.braced");
    write_braced_file(&path, &tree).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ \"moa-1\" $ { \"moa-2\" } }");
}

#[test]
fn test_fn_codec_round_trip() {
    let codec = FnCodec::new(
        |point: &(i32, i32)| format!("{},{}", point.0, point.1),
        |text: &str| -> Result<(i32, i32), String> {
            let (x, y) = text.split_once(',').ok_or_else(|| format!("expected x,y in {text:?}"))?;
            let x = x.trim().parse::<i32>().map_err(|e| e.to_string())?;
            let y = y.trim().parse::<i32>().map_err(|e| e.to_string())?;
            Ok((x, y))
        },
    );

    let mut tree = BinaryTree::new((0, 0));
    let root = tree.root();
    tree.attach_left(root, (-1, 2)).unwrap();

    let braced = to_braced(&tree, &codec).unwrap();
    assert_eq!(braced, "{ \"0,0\" { \"-1,2\" } }");

    let parser = BracedParser::new(codec);
    let decoded = parser.parse_str(&braced).unwrap();
    assert_eq!(shape(&decoded), shape(&tree));

    let err = parser.parse_str("{ \"7\" }").unwrap_err();
    assert_eq!(
        err.kind(),
        &ParsingErrorType::PayloadRejected("expected x,y in \"7\"".to_string())
    );
}

// --- FILES ---
#[test]
fn test_file_round_trip() {
    init_test_setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("example.braced");

    write_braced_file(&path, &example_tree()).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), EXAMPLE_BRACED);

    let tree: BinaryTree<u32> = parse_braced_file(&path).unwrap();
    assert_eq!(shape(&tree), shape(&example_tree()));
}

#[test]
fn test_rejected_write_creates_no_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rejected.braced");

    let tree = BinaryTree::new("{oops}".to_string());
    assert!(write_braced_file(&path, &tree).is_err());
    assert!(!path.exists());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = parse_braced_file::<String, _>(dir.path().join("missing.braced")).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}
