#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn texts(heap: &Heap, stack: &Stack) -> Vec<String> {
    stack
        .values()
        .iter()
        .map(|&v| String::from_utf8_lossy(heap.text(v)).into_owned())
        .collect()
}

fn push_all(heap: &mut Heap, stack: &mut Stack, items: &[&str]) {
    for item in items {
        let v = heap.scalar(item.as_bytes());
        stack.push(heap, v).unwrap();
    }
}

#[test]
fn push_retains_and_pop_releases() {
    let mut heap = Heap::new();
    let mut stack = Stack::default();
    let v = heap.scalar(b"x");
    stack.push(&mut heap, v).unwrap();
    assert_eq!(heap.refs(v), Some(1));
    assert_eq!(stack.depth(), 1);

    assert_eq!(stack.pop(&mut heap), v);
    assert_eq!(heap.refs(v), Some(0));
    assert_eq!(stack.depth(), 0);
}

#[test]
fn underflow_yields_null() {
    let mut heap = Heap::new();
    let mut stack = Stack::default();
    assert_eq!(stack.pop(&mut heap), ValueId::NULL);
    assert_eq!(stack.peek(1), ValueId::NULL);
}

#[test]
fn overflow_is_refused() {
    let mut heap = Heap::new();
    let mut stack = Stack::new(2);
    push_all(&mut heap, &mut stack, &["a", "b"]);
    let extra = heap.scalar(b"c");
    assert_eq!(
        stack.push(&mut heap, extra),
        Err(StackOverflow { max_depth: 2 })
    );
    assert_eq!(heap.refs(extra), Some(0));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn arrays_are_duplicated_on_push() {
    let mut heap = Heap::new();
    let mut stack = Stack::default();
    let array = heap.dim(1);
    stack.push(&mut heap, array).unwrap();
    let pushed = stack.peek(1);
    assert_ne!(pushed, array);
    assert_eq!(heap.refs(array), Some(0));

    let v = heap.scalar(b"v");
    heap.array_set(pushed, 1, v);
    assert_eq!(heap.array_get(array, 1), ValueId::NULL);
}

#[test]
fn peek_counts_from_the_top() {
    let mut heap = Heap::new();
    let mut stack = Stack::default();
    push_all(&mut heap, &mut stack, &["a", "b", "c"]);
    assert_eq!(heap.text(stack.peek(1)), b"c");
    assert_eq!(heap.text(stack.peek(3)), b"a");
    assert_eq!(stack.peek(4), ValueId::NULL);
    assert_eq!(stack.peek(0), ValueId::NULL);
    assert_eq!(stack.peek(-1), ValueId::NULL);
}

#[test]
fn rotate_moves_nth_to_top() {
    let mut heap = Heap::new();
    let mut stack = Stack::default();
    push_all(&mut heap, &mut stack, &["a", "b", "c", "d"]);

    stack.rotate(&mut heap, 3).unwrap();
    assert_eq!(texts(&heap, &stack), ["a", "c", "d", "b"]);

    stack.rotate(&mut heap, 1).unwrap();
    assert_eq!(texts(&heap, &stack), ["a", "c", "d", "b"]);

    stack.rotate(&mut heap, 4).unwrap();
    assert_eq!(texts(&heap, &stack), ["c", "d", "b", "a"]);
}

#[test]
fn rotate_out_of_range_pushes_null() {
    let mut heap = Heap::new();
    let mut stack = Stack::default();
    push_all(&mut heap, &mut stack, &["a"]);
    stack.rotate(&mut heap, 5).unwrap();
    stack.rotate(&mut heap, 0).unwrap();
    assert_eq!(texts(&heap, &stack), ["a", "[NULL]", "[NULL]"]);
}

#[test]
fn swap_exchanges_stacks() {
    let mut heap = Heap::new();
    let mut stack = Stack::default();
    push_all(&mut heap, &mut stack, &["a", "b"]);
    stack.swap();
    assert_eq!(stack.depth(), 0);
    push_all(&mut heap, &mut stack, &["z"]);
    stack.swap();
    assert_eq!(texts(&heap, &stack), ["a", "b"]);
    stack.swap();
    assert_eq!(texts(&heap, &stack), ["z"]);
}

#[test]
fn list_size_stops_at_null() {
    let mut heap = Heap::new();
    let mut stack = Stack::default();
    push_all(&mut heap, &mut stack, &["x"]);
    stack.push(&mut heap, ValueId::NULL).unwrap();
    push_all(&mut heap, &mut stack, &["a", "b", "c"]);
    assert_eq!(stack.list_size(&heap), 3);

    let mut plain = Stack::default();
    push_all(&mut heap, &mut plain, &["a", "b"]);
    assert_eq!(plain.list_size(&heap), 2);
}
