use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mindmap_layout::config::{Config, PlacementConfig};
use mindmap_layout::text::{EstimatedMetrics, resize_nodes};
use mindmap_layout::{MindMap, NodeId, auto_layout, classify, nodes_bounding_box};
use std::hint::black_box;

/// Center plus `fanout` children per node for `depth` levels on each side.
fn balanced_map(fanout: usize, depth: usize) -> MindMap {
    let placement = PlacementConfig::default();
    let mut map = MindMap::with_center("center");
    let Some(center) = map.center() else {
        return map;
    };

    let mut frontier: Vec<NodeId> = vec![center];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * fanout);
        for parent in &frontier {
            for _ in 0..fanout {
                next.push(map.add_child_node(*parent, &placement).expect("add child"));
            }
        }
        frontier = next;
    }

    let mut frontier: Vec<NodeId> = vec![center];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * fanout);
        for target in &frontier {
            for _ in 0..fanout {
                next.push(map.add_parent_node(*target, &placement).expect("add parent"));
            }
        }
        frontier = next;
    }

    for node in map.nodes_mut() {
        node.text = format!("Topic {} with a little body text", node.id.0);
    }
    map
}

/// A long forward chain; exercises the deepest-first interior pass.
fn chain_map(len: usize) -> MindMap {
    let placement = PlacementConfig::default();
    let mut map = MindMap::with_center("center");
    let Some(mut tail) = map.center() else {
        return map;
    };
    for _ in 0..len {
        tail = map.add_child_node(tail, &placement).expect("add child");
    }
    map
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for (fanout, depth) in [(3usize, 3usize), (4, 4), (6, 3)] {
        let map = balanced_map(fanout, depth);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{fanout}x{depth}")),
            &map,
            |b, map| {
                b.iter(|| {
                    let classification = classify(black_box(map));
                    black_box(classification.max_level);
                });
            },
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let config = Config::default();
    let mut group = c.benchmark_group("auto_layout");
    for (fanout, depth) in [(3usize, 3usize), (4, 4), (6, 3)] {
        let map = balanced_map(fanout, depth);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{fanout}x{depth}")),
            &map,
            |b, map| {
                b.iter(|| {
                    let mut map = map.clone();
                    let classification = auto_layout(black_box(&mut map), &config.layout).expect("layout failed");
                    black_box(classification);
                });
            },
        );
    }
    for len in [50usize, 200] {
        let map = chain_map(len);
        group.bench_with_input(BenchmarkId::new("chain", len), &map, |b, map| {
            b.iter(|| {
                let mut map = map.clone();
                let classification = auto_layout(black_box(&mut map), &config.layout).expect("layout failed");
                black_box(classification);
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let config = Config::default();
    let map = balanced_map(4, 4);
    c.bench_function("end_to_end_4x4", |b| {
        b.iter(|| {
            let mut map = map.clone();
            resize_nodes(&mut map, &EstimatedMetrics);
            auto_layout(&mut map, &config.layout).expect("layout failed");
            let bounds = nodes_bounding_box(black_box(&map), &config.bounds);
            black_box(bounds.width());
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_classify, bench_layout, bench_end_to_end
);
criterion_main!(benches);
