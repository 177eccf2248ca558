// Drag-and-drop walkthrough: apply a few moves and print the outline after each.
use tracing_subscriber::EnvFilter;
use tui_flattree::{
    FlatNode, Locator, TreeAction, TreeGlyphs, TreeLineStyle, TreeSession, default_label,
    tree_label_line,
};

fn records() -> Vec<FlatNode> {
    vec![
        FlatNode::new(1, 0, 1, 1),
        FlatNode::new(2, 0, 2, 1),
        FlatNode::new(3, 0, 3, 1),
        FlatNode::new(4, 3, 1, 2),
        FlatNode::new(5, 1, 1, 2),
        FlatNode::new(6, 1, 2, 2),
        FlatNode::new(7, 2, 1, 2),
        FlatNode::new(8, 2, 2, 2),
        FlatNode::new(9, 3, 2, 2),
        FlatNode::new(10, 4, 1, 3),
    ]
}

fn print_outline(title: &str, session: &TreeSession) {
    let glyphs = TreeGlyphs::unicode();
    println!("{title}");
    for row in session.visible_rows() {
        let line = tree_label_line(&row, default_label(row.id), &glyphs, TreeLineStyle::default());
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        println!("  {text}");
    }
    println!();
}

fn main() {
    // RUST_LOG=tui_flattree=debug shows builds and moves.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut session = TreeSession::new(records());
    print_outline("initial", &session);

    // Collapse 4, then drag it to the top of the root list. It stays collapsed.
    let _ = session.handle_action(TreeAction::Collapse(4));
    let source = session.locate(4).unwrap_or(Locator::new(3, 0));
    if let Err(err) = session.handle_action(TreeAction::Move {
        source,
        destination: Some(Locator::top_level(0)),
    }) {
        eprintln!("move failed: {err}");
    }
    print_outline("4 moved to the top", &session);

    // Reorder inside 2: 7 after 8.
    if let Err(err) = session.apply_move(Locator::new(2, 0), Some(Locator::new(2, 1))) {
        eprintln!("move failed: {err}");
    }
    print_outline("7 after 8", &session);

    // Dropping 1 into its own child is rejected.
    if let Err(err) = session.apply_move(Locator::top_level(1), Some(Locator::new(5, 0))) {
        println!("rejected: {err}");
    }
}
