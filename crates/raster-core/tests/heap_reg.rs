//! Priority heap regression test
//!
//! Random keys are pushed and popped in both directions and compared with
//! a reference sort; strict-order sorting is checked the same way.

use raster_core::{Heap, SortOrder};
use raster_test::RegParams;

/// Keys from a fixed LCG, so the sequence is stable across runs.
fn keys(n: usize, seed: u32) -> Vec<f32> {
    let mut x = seed;
    (0..n)
        .map(|_| {
            x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (x >> 8) as f32 / 1000.0
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: usize,
    dist: f32,
}

#[test]
fn heap_reg() {
    let mut rp = RegParams::new("heap");
    let vals = keys(500, 42);

    // Min-heap pop order
    let mut heap = Heap::new(SortOrder::Increasing, |it: &Item| it.dist);
    for (id, &dist) in vals.iter().enumerate() {
        heap.push(Item { id, dist }).unwrap();
    }
    rp.compare_values(500.0, heap.count() as f64, 0.0);
    let popped: Vec<f32> = std::iter::from_fn(|| heap.pop()).map(|it| it.dist).collect();
    let mut sorted = vals.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    rp.check(popped == sorted, "increasing pop order");
    rp.compare_values(0.0, heap.count() as f64, 0.0);

    // Max-heap with interleaved push and pop
    let mut heap = Heap::new(SortOrder::Decreasing, |v: &f32| *v);
    let mut reference: Vec<f32> = Vec::new();
    let mut ok = true;
    for (i, &v) in vals.iter().enumerate() {
        heap.push(v).unwrap();
        reference.push(v);
        if i % 3 == 2 {
            reference.sort_by(|a, b| a.total_cmp(b));
            ok &= heap.pop() == reference.pop();
        }
    }
    rp.check(ok, "decreasing interleaved pops");
    rp.compare_values(reference.len() as f64, heap.count() as f64, 0.0);

    // Strict sort
    let mut heap = Heap::new(SortOrder::Increasing, |v: &f32| *v);
    for &v in &vals {
        heap.push(v).unwrap();
    }
    heap.sort_strict_order();
    rp.check(
        heap.iter().copied().collect::<Vec<_>>() == sorted,
        "strict increasing sort",
    );
    // Popping a strictly sorted heap still yields sorted output
    let popped: Vec<f32> = std::iter::from_fn(|| heap.pop()).collect();
    rp.check(popped == sorted, "pop after strict sort");

    assert!(rp.cleanup());
}

#[test]
fn heap_references_reg() {
    let mut rp = RegParams::new("heap_references");

    // The heap queues borrowed items without copying them
    let items: Vec<Item> = keys(50, 7)
        .into_iter()
        .enumerate()
        .map(|(id, dist)| Item { id, dist })
        .collect();
    let mut heap = Heap::with_capacity(4, SortOrder::Decreasing, |it: &&Item| it.dist).unwrap();
    for it in &items {
        heap.push(it).unwrap();
    }
    let best = items
        .iter()
        .max_by(|a, b| a.dist.total_cmp(&b.dist))
        .map(|it| it.id);
    rp.check(heap.pop().map(|it| it.id) == best, "max item first");
    rp.check(heap.capacity() >= 49, "capacity grew");

    assert!(rp.cleanup());
}
