#![allow(dead_code)]

use bracetree::model::BinaryTree;
use std::sync::Once;
use tracing::info;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

static TEST_SETUP: Once = Once::new();

/// Installs a global tracing subscriber once per test binary.
///
/// Honours `RUST_LOG`, falling back to `debug` output on stderr.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            return;
        }
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {e}");
        });
        info!("Test Setup complete");
    });
}

/// The eight node example tree used throughout the tests:
/// ```text
///         1
///       /   \
///      2     3
///     / \   / \
///    4   5 6   7
///           \
///            8
/// ```
pub fn example_tree() -> BinaryTree<u32> {
    let mut tree = BinaryTree::new(1);
    let root = tree.root();
    let two = tree.attach_left(root, 2).unwrap();
    let three = tree.attach_right(root, 3).unwrap();
    tree.attach_left(two, 4).unwrap();
    tree.attach_right(two, 5).unwrap();
    let six = tree.attach_left(three, 6).unwrap();
    tree.attach_right(three, 7).unwrap();
    tree.attach_right(six, 8).unwrap();
    tree
}

/// Braced text of [example_tree]
pub const EXAMPLE_BRACED: &str = "{ \"1\" { \"2\" { \"4\" } { \"5\" } } { \"3\" { \"6\" $ { \"8\" } } { \"7\" } } }";

/// Payloads in pre-order
pub fn pre_order_payloads<T: Clone>(tree: &BinaryTree<T>) -> Vec<T> {
    tree.pre_order_iter().map(|(_, node)| node.payload().clone()).collect()
}
