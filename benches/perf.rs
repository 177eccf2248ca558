use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tui_flattree::{FlatNode, Hierarchy, Locator, NodeId, ROOT_ID, move_node, visible_rows};

// Balanced tree: every node has `fanout` children until `count` records exist.
fn wide_records(count: usize, fanout: usize) -> Vec<FlatNode> {
    let mut records = Vec::with_capacity(count);
    for idx in 0..count {
        let id = idx as NodeId + 1;
        let (parent_id, order) = if idx < fanout {
            (ROOT_ID, idx + 1)
        } else {
            ((idx / fanout) as NodeId, idx % fanout + 1)
        };
        records.push(FlatNode::new(id, parent_id, order as u32, 0));
    }
    records
}

fn bench_build(c: &mut Criterion) {
    let records = wide_records(10_000, 8);
    c.bench_function("build_10k", |b| {
        b.iter(|| Hierarchy::build(black_box(&records)));
    });

    let tree = Hierarchy::build(&records);
    c.bench_function("visible_rows_10k", |b| {
        b.iter(|| visible_rows(black_box(&tree)));
    });
}

fn bench_move(c: &mut Criterion) {
    let records = wide_records(10_000, 8);
    c.bench_function("move_across_groups_10k", |b| {
        b.iter(|| {
            move_node(
                black_box(&records),
                Locator::new(3, 0),
                Some(Locator::new(900, 4)),
            )
        });
    });
    c.bench_function("move_within_group_10k", |b| {
        b.iter(|| {
            move_node(
                black_box(&records),
                Locator::top_level(0),
                Some(Locator::top_level(7)),
            )
        });
    });
}

criterion_group!(benches, bench_build, bench_move);
criterion_main!(benches);
