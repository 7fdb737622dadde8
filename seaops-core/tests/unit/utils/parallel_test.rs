use super::*;

#[test]
fn can_collect_in_source_order() {
    let source = (0..1000).collect::<Vec<_>>();

    let result = ThreadPool::new(4).execute(|| parallel_into_collect(source, |item| item * 2));

    assert_eq!(result, (0..1000).map(|item| item * 2).collect::<Vec<_>>());
}

#[test]
fn can_map_reduce() {
    let source = (1..=100).collect::<Vec<usize>>();

    let result = map_reduce(source.as_slice(), |item| *item, || 0, |a, b| a + b);

    assert_eq!(result, 5050);
}

#[test]
fn can_use_default_on_empty_source() {
    let source: Vec<usize> = vec![];

    let result = map_reduce(source.as_slice(), |item| Some(*item), || None, |a, b| a.or(b));

    assert_eq!(result, None);
}
