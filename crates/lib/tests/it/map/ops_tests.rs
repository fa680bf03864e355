//! Collection operation integration tests
//!
//! Mapping, filtering, first/last lookups, sorting, chunking, the in-place
//! sequence operations, random sampling and the key/value utilities.

use std::cmp::Ordering;

use nestmap::{ChunkKeys, Key, KeyCase, OrderedMap, Value};
use serde_json::json;

use crate::helpers::*;

// ===== CONSTRUCTION =====

#[test]
fn test_range() {
    let hundred = OrderedMap::range(1, 100, 1).unwrap();
    assert_eq!(hundred.len(), 100);
    assert_eq!(hundred.first(), Some(&Value::Int(1)));
    assert_eq!(hundred.last(), Some(&Value::Int(100)));
    assert!(hundred.is_list());

    assert_eq!(
        OrderedMap::range(1, 100, 20).unwrap(),
        OrderedMap::from_values([1, 21, 41, 61, 81])
    );
    assert_eq!(
        OrderedMap::range(0, 10, 2).unwrap(),
        OrderedMap::from_values([0, 2, 4, 6, 8, 10])
    );
    assert_eq!(
        OrderedMap::range(2, -2, 2).unwrap(),
        OrderedMap::from_values([2, 0, -2])
    );

    let err = OrderedMap::range(0, 10, 0).unwrap_err();
    assert_eq!(err.operation(), Some("range"));
}

#[test]
fn test_char_range() {
    let alphabet = OrderedMap::char_range('a', 'z');
    assert_eq!(alphabet.len(), 26);
    assert_eq!(alphabet.implode("", None), "abcdefghijklmnopqrstuvwxyz");

    assert_eq!(
        OrderedMap::char_range('c', 'a'),
        OrderedMap::from_values(["c", "b", "a"])
    );
}

// ===== MAP / FILTER / REDUCE =====

#[test]
fn test_map_with_key() {
    let map = fixture(json!({"a": 1, "b": 2}));
    let labelled = map.map(|value, key| Value::from(format!("{key}{value}")));
    assert_eq!(labelled, fixture(json!({"a": "a1", "b": "b2"})));
}

#[test]
fn test_map_nested() {
    let map = fixture(json!({"a": 1, "b": {"a": 2, "b": {"a": 3}}}));

    let doubled = map.map_nested(|value, _| Value::from(value.as_int_or(0) * 2));
    assert_eq!(doubled, fixture(json!({"a": 2, "b": {"a": 4, "b": {"a": 6}}})));

    let labelled = map.map_nested(|_, key| Value::from(key.to_string()));
    assert_eq!(
        labelled,
        fixture(json!({"a": "a", "b": {"a": "b.a", "b": {"a": "b.b.a"}}}))
    );
}

#[test]
fn test_filter() {
    let map = fixture(json!({"a": 1, "b": 2, "c": 3, "d": 4}));

    let even = map.filter(|value, _| value.as_int().is_some_and(|n| n % 2 == 0));
    assert_eq!(even, fixture(json!({"b": 2, "d": 4})));

    let by_key = map.filter(|_, key| *key == "a" || *key == "c");
    assert_eq!(by_key, fixture(json!({"a": 1, "c": 3})));
}

#[test]
fn test_compact_drops_falsy_values() {
    let map = fixture(json!({
        "zero": 0, "one": 1, "empty": "", "text": "x", "null": null,
        "false": false, "true": true, "none": {}, "some": [0]
    }));

    assert_eq!(
        key_strings(&map.compact()),
        vec!["one", "text", "true", "some"]
    );
}

#[test]
fn test_reduce() {
    let map = OrderedMap::from_values([1, 2, 3, 4, 5]);

    let sum = map.reduce(-10, |acc, value| acc + value.as_int_or(0));
    assert_eq!(sum, 5);

    let total = map.reduce_first(|acc, value| Value::from(acc.as_int_or(0) + value.as_int_or(0)));
    assert_eq!(total, Some(Value::Int(15)));

    assert_eq!(OrderedMap::new().reduce_first(|acc, _| acc), None);
}

// ===== FIRST / LAST =====

#[test]
fn test_first_and_last() {
    let map = fixture(json!({"a": 1, "b": 2, "c": 3, "d": 4}));
    let default = Value::from("default");

    assert_eq!(map.first(), Some(&Value::Int(1)));
    assert_eq!(map.last(), Some(&Value::Int(4)));
    assert_eq!(map.first_where(|value, _| *value == 3), Some(&Value::Int(3)));
    assert_eq!(map.last_where(|value, _| value.as_int_or(0) < 3), Some(&Value::Int(2)));
    assert_eq!(map.first_where(|_, key| *key == "b"), Some(&Value::Int(2)));

    // No match falls back to the default, or None without one
    assert_eq!(map.first_where(|value, _| *value == 10), None);
    assert_eq!(map.last_where(|value, _| *value == 10), None);
    assert_eq!(map.first_where_or(|value, _| *value == 10, &default), &default);
    assert_eq!(map.last_where_or(|value, _| *value == 10, &default), &default);

    let empty = OrderedMap::new();
    assert_eq!(empty.first(), None);
    assert_eq!(empty.last(), None);
}

#[test]
fn test_first_and_last_key() {
    let map = fixture(json!({"a": 1, "b": 2, "c": 3, "d": 4}));

    assert_eq!(map.first_key(), Some(&Key::from("a")));
    assert_eq!(map.last_key(), Some(&Key::from("d")));
    assert_eq!(map.first_key_where(|value, _| value.as_int_or(0) > 1), Some(&Key::from("b")));
    assert_eq!(map.last_key_where(|value, _| value.as_int_or(0) < 4), Some(&Key::from("c")));
    assert_eq!(map.first_key_where(|_, key| *key == "z"), None);
    assert_eq!(OrderedMap::new().last_key(), None);
}

// ===== DIFF =====

#[test]
fn test_diff() {
    let map = fixture(json!({"a": "green", "0": "red", "b": "brown", "1": "blue", "2": "red"}));
    let other = OrderedMap::from_values(["green", "yellow", "red"]);

    assert_eq!(map.diff([&other]), fixture(json!({"b": "brown", "1": "blue"})));

    let more = OrderedMap::from_values(["blue"]);
    assert_eq!(map.diff([&other, &more]), fixture(json!({"b": "brown"})));
    assert_eq!(map.diff(Vec::<&OrderedMap>::new()), map);
}

// ===== SORTING =====

#[test]
fn test_sort() {
    let map = OrderedMap::from_values([5, 4, 3, 2, 1]);
    let sorted = map.sort();

    assert_eq!(sorted.values_list(), OrderedMap::from_values([1, 2, 3, 4, 5]));
    // Keys travel with their values
    assert_eq!(sorted.first_key(), Some(&Key::Index(4)));
    assert_eq!(map.sort().sort(), map.sort());
}

#[test]
fn test_reverse_sort() {
    let map = OrderedMap::from_values([3, 5, 1, 4, 2]);
    assert_eq!(
        map.reverse_sort().values_list(),
        OrderedMap::from_values([5, 4, 3, 2, 1])
    );
}

#[test]
fn test_sort_by_callback() {
    let map = OrderedMap::from_values([5, 4, 3, 2, 1]);

    // Odd values first, each group ascending
    let sorted = map.sort_by(|a, b| {
        let (a, b) = (a.as_int_or(0), b.as_int_or(0));
        (a % 2 == 0).cmp(&(b % 2 == 0)).then(a.cmp(&b))
    });
    assert_eq!(sorted.values_list(), OrderedMap::from_values([1, 3, 5, 2, 4]));
    assert_eq!(
        sorted.key_list(),
        OrderedMap::from_values([4u64, 2, 0, 3, 1])
    );
}

#[test]
fn test_sort_is_stable() {
    let map = fixture(json!({"a": 1, "b": 0, "c": 1, "d": 0}));
    let sorted = map.sort_by(|a, b| a.compare(b));
    assert_eq!(key_strings(&sorted), vec!["b", "d", "a", "c"]);
}

#[test]
fn test_sort_mixed_types() {
    let map = OrderedMap::from_values([
        Value::from("text"),
        Value::Int(2),
        Value::Null,
        Value::Float(1.5),
        Value::Bool(true),
    ]);

    assert_eq!(
        map.sort().values_list(),
        OrderedMap::from_values([
            Value::Null,
            Value::Bool(true),
            Value::Float(1.5),
            Value::Int(2),
            Value::from("text"),
        ])
    );
}

#[test]
fn test_sort_keys() {
    let map = fixture(json!({"c": 1, "a": 2, "1": 3, "b": 4, "0": 5}));
    assert_eq!(key_strings(&map.sort_keys()), vec!["0", "1", "a", "b", "c"]);

    let by_length = fixture(json!({"ccc": 1, "a": 2, "bb": 3}))
        .sort_keys_by(|a, b| a.to_string().len().cmp(&b.to_string().len()));
    assert_eq!(key_strings(&by_length), vec!["a", "bb", "ccc"]);

    let reversed = map.sort_keys_by(|a, b| b.cmp(a));
    assert_eq!(key_strings(&reversed), vec!["c", "b", "a", "1", "0"]);
}

// ===== CHUNK =====

#[test]
fn test_chunk_renumbered() {
    let map = OrderedMap::range(0, 99, 1).unwrap();
    let chunks = map.chunk(20, ChunkKeys::Renumber).unwrap();

    assert_eq!(chunks.len(), 5);
    for (i, chunk) in chunks.values().enumerate() {
        let chunk = chunk.as_map().unwrap();
        let start = 20 * i as i64;
        assert_eq!(chunk, &OrderedMap::range(start, start + 19, 1).unwrap());
    }
}

#[test]
fn test_chunk_preserving_keys() {
    let map = OrderedMap::range(0, 99, 1).unwrap();
    let chunks = map.chunk(20, ChunkKeys::Preserve).unwrap();

    let third = chunks.get("2").and_then(Value::as_map).unwrap();
    assert_eq!(third.first_key(), Some(&Key::Index(40)));
    assert_eq!(third.get_key(59u64), Some(&Value::Int(59)));
}

#[test]
fn test_chunk_uneven_and_invalid() {
    let map = OrderedMap::from_values(["a", "b", "c"]);
    let chunks = map.chunk(2, ChunkKeys::Renumber).unwrap();
    assert_eq!(chunks, fixture(json!([["a", "b"], ["c"]])));

    assert!(map.chunk(10, ChunkKeys::Preserve).unwrap().len() == 1);
    assert!(OrderedMap::new().chunk(3, ChunkKeys::Preserve).unwrap().is_empty());

    let err = map.chunk(0, ChunkKeys::Renumber).unwrap_err();
    assert!(err.is_argument_error());
    assert_eq!(err.operation(), Some("chunk"));
}

// ===== PUSH / POP / SHIFT =====

#[test]
fn test_push() {
    let mut map = fixture(json!({"a": 1, "b": 2, "c": 3}));
    map.push("test");
    assert_eq!(map.len(), 4);
    assert_eq!(map.get_key(0), Some(&Value::from("test")));

    map.extend_values([
        Value::from("hello"),
        Value::from("how"),
        Value::from("are"),
        Value::Map(OrderedMap::new().with("you", "?")),
    ]);
    assert_eq!(
        map,
        fixture(json!({
            "a": 1, "b": 2, "c": 3,
            "0": "test", "1": "hello", "2": "how", "3": "are",
            "4": {"you": "?"}
        }))
    );
}

#[test]
fn test_push_after_sparse_indices() {
    let mut map = OrderedMap::new().with(7u64, "seven").with(2u64, "two");
    map.push("next");
    assert_eq!(map.last_key(), Some(&Key::Index(8)));
}

#[test]
fn test_pop() {
    let mut map = OrderedMap::from_values([1, 2, 3, 4, 5]);
    assert_eq!(map.pop(), Some(Value::Int(5)));
    assert_eq!(map, OrderedMap::from_values([1, 2, 3, 4]));

    let mut map = OrderedMap::from_values([1, 2, 3, 4, 5]);
    assert_eq!(map.pop_many(3).unwrap(), OrderedMap::from_values([5, 4, 3]));
    assert_eq!(map, OrderedMap::from_values([1, 2]));

    let mut map = OrderedMap::from_values([1, 2, 3]);
    assert!(map.pop_many(5).unwrap_err().is_argument_error());
    assert_eq!(map.len(), 3);

    assert_eq!(map.pop_many(3).unwrap(), OrderedMap::from_values([3, 2, 1]));
    assert!(map.is_empty());
    assert_eq!(map.pop(), None);

    let mut map = OrderedMap::from_values([1, 2, 3]);
    assert!(map.pop_many(0).unwrap().is_empty());
    assert_eq!(map.len(), 3);
}

#[test]
fn test_shift() {
    let mut map = OrderedMap::from_values([1, 2, 3, 4, 5]);
    assert_eq!(map.shift(), Some(Value::Int(1)));
    assert_eq!(map, OrderedMap::from_values([2, 3, 4, 5]));

    let mut map = OrderedMap::from_values([1, 2, 3, 4, 5]);
    assert_eq!(map.shift_many(3).unwrap(), OrderedMap::from_values([1, 2, 3]));
    assert_eq!(map, OrderedMap::from_values([4, 5]));

    let mut map = OrderedMap::from_values([1, 2, 3]);
    let err = map.shift_many(5).unwrap_err();
    assert_eq!(err.operation(), Some("shift_many"));
    assert_eq!(map, OrderedMap::from_values([1, 2, 3]));

    assert_eq!(map.shift_many(3).unwrap(), OrderedMap::from_values([1, 2, 3]));
    assert!(map.is_empty());
    assert_eq!(map.shift(), None);
}

#[test]
fn test_shift_keeps_name_keys() {
    let mut map = fixture(json!({"first": 1, "second": 2, "third": 3}));
    assert_eq!(map.shift(), Some(Value::Int(1)));
    assert_eq!(map, fixture(json!({"second": 2, "third": 3})));
}

// ===== RANDOM =====

#[test]
fn test_random_key() {
    let map = fixture(json!({"cat": 1, "dog": 2, "bird": 3}));
    let mut rng = seeded_rng();

    for _ in 0..20 {
        let key = map.random_key_with(&mut rng).unwrap();
        assert!(map.contains_key(key));
    }
    assert!(map.random_key().is_some());
    assert_eq!(OrderedMap::new().random_key(), None);
}

#[test]
fn test_random_keys() {
    let map = fixture(json!({"cat": 1, "dog": 2, "bird": 3}));
    let mut rng = seeded_rng();

    for _ in 0..20 {
        let keys = map.random_keys_with(2, &mut rng).unwrap();
        assert_eq!(keys.len(), 2);

        // Picked keys appear in collection order
        let positions: Vec<usize> = keys
            .values()
            .map(|key| key_strings(&map).iter().position(|k| *k == key.to_string()).unwrap())
            .collect();
        assert!(positions[0] < positions[1]);
    }

    assert_eq!(map.random_keys(3).unwrap(), map.key_list());
    assert!(map.random_keys(0).unwrap_err().is_argument_error());
    assert!(map.random_keys(4).unwrap_err().is_argument_error());
}

#[test]
fn test_random_with_same_seed_is_repeatable() {
    let map = OrderedMap::range(0, 50, 1).unwrap();
    let first = map.random_keys_with(10, &mut seeded_rng()).unwrap();
    let second = map.random_keys_with(10, &mut seeded_rng()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_shuffle() {
    let map = OrderedMap::range(1, 20, 1).unwrap();
    let mut rng = seeded_rng();

    let kept = map.shuffle_with(true, &mut rng);
    assert_eq!(kept.len(), map.len());
    for (key, value) in kept.iter() {
        assert_eq!(map.get_key(key), Some(value));
    }
    assert_eq!(kept.sort_keys(), map);

    let renumbered = map.shuffle_with(false, &mut rng);
    assert!(renumbered.is_list());
    assert_eq!(renumbered.sort().values_list(), map);

    assert_eq!(map.shuffle(true).len(), 20);
}

// ===== KEYS, VALUES AND REORDERING =====

#[test]
fn test_reverse() {
    let map = fixture(json!({"a": 1, "b": 2, "0": 3}));
    let reversed = map.reverse();
    assert_eq!(key_strings(&reversed), vec!["0", "b", "a"]);
    assert_eq!(reversed.reverse(), map);
}

#[test]
fn test_key_and_value_lists() {
    let map = fixture(json!({"a": "x", "0": "y"}));
    assert_eq!(map.key_list(), OrderedMap::from_values([Value::from("a"), Value::Int(0)]));
    assert_eq!(map.values_list(), OrderedMap::from_values(["x", "y"]));
}

#[test]
fn test_change_key_case() {
    let map = fixture(json!({"FirSt": 1, "SecOnd": 4, "0": "index"}));

    assert_eq!(
        map.change_key_case(KeyCase::Lower),
        fixture(json!({"first": 1, "second": 4, "0": "index"}))
    );
    assert_eq!(
        map.change_key_case(KeyCase::Upper),
        fixture(json!({"FIRST": 1, "SECOND": 4, "0": "index"}))
    );
}

#[test]
fn test_change_key_case_collision() {
    let map = fixture(json!({"Key": 1, "other": 2, "KEY": 3}));
    let lower = map.change_key_case(KeyCase::Lower);
    assert_eq!(lower, fixture(json!({"key": 3, "other": 2})));
}

#[test]
fn test_column() {
    let players = fixture(json!({
        "player_1": {"name": "John", "hp": 50, "exp": 1000},
        "player_2": {"name": "Jane", "hp": 70, "exp": 1000}
    }));

    assert_eq!(players.column("hp", None), OrderedMap::from_values([50, 70]));
    assert_eq!(
        players.column("hp", Some("name")),
        fixture(json!({"John": 50, "Jane": 70}))
    );
}

#[test]
fn test_column_nested_and_integer_keys() {
    let players = fixture(json!({
        "player_1": {"stats": {"name": "John", "hp": 50}, "3": "hello 3", "4": "hello 4"},
        "player_2": {"stats": {"name": "Jane", "hp": 70}, "3": "goodbye 3", "4": "goodbye 4"},
        "ignored": "not a row"
    }));

    assert_eq!(
        players.column("3", None),
        OrderedMap::from_values(["hello 3", "goodbye 3"])
    );
    assert_eq!(
        players.column("stats.hp", Some("4")),
        fixture(json!({"hello 4": 50, "goodbye 4": 70}))
    );
    assert_eq!(
        players.column("stats.hp", Some("stats.name")),
        fixture(json!({"John": 50, "Jane": 70}))
    );
    // Rows without an index value take the next free index
    assert_eq!(
        players.column("stats.hp", Some("missing")),
        OrderedMap::from_values([50, 70])
    );
}

#[test]
fn test_combine() {
    let keys = OrderedMap::from_values(["a", "b", "c"]);
    assert_eq!(
        keys.combine([1, 2, 3]).unwrap(),
        fixture(json!({"a": 1, "b": 2, "c": 3}))
    );

    let err = keys.combine([1, 2]).unwrap_err();
    assert!(err.is_argument_error());

    let bad_keys = OrderedMap::from_values([Value::Float(1.5)]);
    assert!(bad_keys.combine([1]).unwrap_err().is_type_error());
}

#[test]
fn test_count_values() {
    let map = OrderedMap::from_values([
        Value::Int(1),
        Value::from("hello"),
        Value::Int(1),
        Value::from("world"),
        Value::from("hello"),
        Value::Float(2.5),
    ]);

    assert_eq!(
        map.count_values(),
        OrderedMap::new().with(1u64, 2).with("hello", 2).with("world", 1)
    );
}

#[test]
fn test_implode() {
    let map = OrderedMap::from_values([Value::from("a"), Value::Int(1), Value::Float(2.5)]);
    assert_eq!(map.implode(", ", None), "a, 1, 2.5");
    assert_eq!(map.implode(", ", Some(" or ")), "a, 1 or 2.5");

    let single = OrderedMap::from_values(["only"]);
    assert_eq!(single.implode(", ", Some(" and ")), "only");
    assert_eq!(OrderedMap::new().implode(", ", Some(" and ")), "");
}

#[test]
fn test_transforms_do_not_alias_receiver() {
    let map = fixture(json!({"a": {"b": 1}}));
    let mut copy = map.map(|value, _| value.clone());
    copy.set("a.b", 2);

    assert_eq!(map.get_as::<i64>("a.b"), Some(1));
    assert_eq!(map.sort_by(|_, _| Ordering::Equal), map);
}
