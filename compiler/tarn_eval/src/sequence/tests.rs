use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;
use crate::EvalResult;

fn drain(value: Value) -> Vec<Value> {
    adapt(value)
        .and_then(|seq| seq.collect::<Result<Vec<_>, _>>())
        .unwrap_or_else(|err| panic!("adapt failed: {err}"))
}

fn strs(items: &[&str]) -> Vec<Value> {
    items.iter().map(|s| Value::string(*s)).collect()
}

/// Host object exposing one iterator accessor that returns a fixed value.
#[derive(Debug)]
struct Bag {
    accessor: &'static str,
    returns: Value,
    calls: Rc<Cell<usize>>,
}

impl Bag {
    fn new(accessor: &'static str, returns: Value) -> Self {
        Bag {
            accessor,
            returns,
            calls: Rc::default(),
        }
    }
}

impl HostObject for Bag {
    fn type_name(&self) -> &str {
        "Bag"
    }

    fn has_method(&self, name: &str) -> bool {
        name == self.accessor
    }

    fn invoke(&self, name: &str, _args: &[Value]) -> EvalResult {
        assert_eq!(name, self.accessor);
        self.calls.set(self.calls.get() + 1);
        Ok(self.returns.clone())
    }
}

#[derive(Debug)]
struct Opaque;

impl HostObject for Opaque {
    fn type_name(&self) -> &str {
        "Opaque"
    }
}

/// Pull-iterator that fails on its second element.
struct Flaky {
    yielded: usize,
}

impl HostIterator for Flaky {
    fn has_next(&mut self) -> bool {
        true
    }

    fn next(&mut self) -> EvalResult {
        self.yielded += 1;
        if self.yielded == 2 {
            Err(EvalError::host("disk on fire"))
        } else {
            Ok(Value::Int(i64::try_from(self.yielded).unwrap_or_default()))
        }
    }
}

mod classification {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_kinds() {
        let cases = [
            (Value::Null, Some(SourceClassification::Empty)),
            (Value::array(vec![]), Some(SourceClassification::Indexed)),
            (Value::list(vec![]), Some(SourceClassification::Ordered)),
            (
                Value::map::<&str>([]),
                Some(SourceClassification::Associative),
            ),
            (
                Value::iterator(Vec::new()),
                Some(SourceClassification::ExternalIterator),
            ),
            (
                Value::enumeration(Vec::new()),
                Some(SourceClassification::LegacyEnumerator),
            ),
            (Value::Bool(true), None),
            (Value::Int(3), None),
            (Value::Float(1.5), None),
            (Value::string("abc"), None),
        ];
        for (value, expected) in cases {
            assert_eq!(classify(&value), expected, "classifying {value:?}");
        }
    }

    #[test]
    fn objects_need_an_accessor() {
        for accessor in ACCESSOR_NAMES {
            let bag = Value::object(Bag::new(accessor, Value::list(vec![])));
            assert_eq!(
                classify(&bag),
                Some(SourceClassification::AccessorDelegated)
            );
        }
        assert_eq!(classify(&Value::object(Bag::new("stream", Value::Null))), None);
        assert_eq!(classify(&Value::object(Opaque)), None);
    }

    #[test]
    fn classify_does_not_consume() {
        let it = Value::iterator(strs(&["a"]));
        assert_eq!(
            classify(&it),
            Some(SourceClassification::ExternalIterator)
        );
        let Value::Iterator(handle) = &it else {
            unreachable!()
        };
        assert!(!handle.is_consumed());
    }

    #[test]
    fn classify_does_not_invoke_accessor() {
        let bag = Bag::new("iterator", Value::list(vec![]));
        let calls = Rc::clone(&bag.calls);
        let value = Value::object(bag);
        assert!(classify(&value).is_some());
        assert_eq!(calls.get(), 0);
    }
}

mod adaptation {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn null_is_empty() {
        let mut seq = adapt(Value::Null).unwrap();
        assert_eq!(seq.classification(), SourceClassification::Empty);
        assert_eq!(seq.try_next().unwrap(), None);
    }

    #[test]
    fn array_in_index_order() {
        assert_eq!(
            drain(Value::array(strs(&["Hello", "World"]))),
            strs(&["Hello", "World"])
        );
    }

    #[test]
    fn list_in_own_order() {
        let items = vec![Value::Int(3), Value::Int(1), Value::Int(2)];
        assert_eq!(drain(Value::list(items.clone())), items);
    }

    #[test]
    fn map_yields_values_in_key_order() {
        let map = Value::map([
            ("b", Value::Int(2)),
            ("c", Value::Int(3)),
            ("a", Value::Int(1)),
        ]);
        assert_eq!(
            drain(map),
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn map_with_empty_key() {
        let map = Value::map([("", Value::Int(0)), ("x", Value::Int(1))]);
        assert_eq!(drain(map), vec![Value::Int(0), Value::Int(1)]);
    }

    #[test]
    fn iterator_is_single_pass() {
        let it = Value::iterator(strs(&["a", "b"]));
        assert_eq!(drain(it.clone()), strs(&["a", "b"]));
        let Value::Iterator(handle) = &it else {
            unreachable!()
        };
        // the drained cursor is back in the handle, with nothing left
        assert!(!handle.is_consumed());
        assert_eq!(drain(it), Vec::<Value>::new());
    }

    #[test]
    fn enumeration_is_single_pass() {
        let en = Value::enumeration(strs(&["x", "y", "z"]));
        assert_eq!(drain(en.clone()), strs(&["x", "y", "z"]));
        assert_eq!(drain(en), Vec::<Value>::new());
    }

    #[test]
    fn cursor_is_on_loan_while_the_sequence_lives() {
        let it = Value::iterator(strs(&["a", "b", "c"]));
        let Value::Iterator(handle) = &it else {
            unreachable!()
        };
        let mut seq = adapt(it.clone()).unwrap();
        assert_eq!(seq.try_next().unwrap(), Some(Value::string("a")));
        assert!(handle.is_consumed());
        // a second sequence over the same handle sees nothing meanwhile
        assert_eq!(drain(it.clone()), Vec::<Value>::new());

        drop(seq);
        assert!(!handle.is_consumed());
        assert_eq!(drain(it), strs(&["b", "c"]));
    }

    #[test]
    fn taken_cursor_yields_nothing() {
        let en = Value::enumeration(strs(&["x"]));
        let Value::Enumeration(handle) = &en else {
            unreachable!()
        };
        let _cursor = handle.take().unwrap();
        let mut seq = adapt(en.clone()).unwrap();
        assert_eq!(seq.classification(), SourceClassification::LegacyEnumerator);
        assert_eq!(seq.try_next().unwrap(), None);
    }

    #[test]
    fn accessor_result_is_reclassified() {
        for returns in [
            Value::array(strs(&["a"])),
            Value::list(strs(&["a"])),
            Value::map([("k", Value::string("a"))]),
            Value::iterator(strs(&["a"])),
            Value::enumeration(strs(&["a"])),
        ] {
            let bag = Bag::new("elements", returns);
            let calls = Rc::clone(&bag.calls);
            let seq = adapt(Value::object(bag)).unwrap();
            assert_eq!(
                seq.classification(),
                SourceClassification::AccessorDelegated
            );
            assert_eq!(seq.collect::<Result<Vec<_>, _>>().unwrap(), strs(&["a"]));
            assert_eq!(calls.get(), 1);
        }
    }

    #[test]
    fn accessor_order_prefers_iterator() {
        #[derive(Debug)]
        struct Both;
        impl HostObject for Both {
            fn type_name(&self) -> &str {
                "Both"
            }
            fn has_method(&self, name: &str) -> bool {
                matches!(name, "iterator" | "elements")
            }
            fn invoke(&self, name: &str, _args: &[Value]) -> EvalResult {
                Ok(Value::list(vec![Value::string(name)]))
            }
        }
        assert_eq!(drain(Value::object(Both)), strs(&["iterator"]));
    }
}

mod failures {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scalars_are_not_iterable() {
        for (value, name) in [
            (Value::Int(42), "integer"),
            (Value::Bool(false), "boolean"),
            (Value::Float(0.5), "float"),
            (Value::string("abc"), "string"),
            (Value::object(Opaque), "Opaque"),
        ] {
            let err = adapt(value).unwrap_err();
            assert_eq!(
                err.kind,
                EvalErrorKind::NotIterable {
                    type_name: name.to_owned()
                }
            );
        }
    }

    #[test]
    fn accessor_must_return_a_direct_source() {
        for (returns, name) in [
            (Value::Int(7), "integer"),
            (Value::Null, "null"),
            (
                Value::object(Bag::new("iter", Value::list(vec![]))),
                "Bag",
            ),
        ] {
            let err = adapt(Value::object(Bag::new("iter", returns))).unwrap_err();
            assert_eq!(
                err.kind,
                EvalErrorKind::AccessorNotIterable {
                    accessor: "iter",
                    type_name: "Bag".to_owned(),
                    returned: name.to_owned(),
                }
            );
        }
    }

    #[test]
    fn accessor_errors_propagate() {
        #[derive(Debug)]
        struct Broken;
        impl HostObject for Broken {
            fn type_name(&self) -> &str {
                "Broken"
            }
            fn has_method(&self, name: &str) -> bool {
                name == "iterator"
            }
            fn invoke(&self, _name: &str, _args: &[Value]) -> EvalResult {
                Err(EvalError::host("closed"))
            }
        }
        let err = adapt(Value::object(Broken)).unwrap_err();
        assert_eq!(err, EvalError::host("closed"));
    }

    #[test]
    fn host_cursor_errors_pass_through() {
        let mut seq = adapt(Value::host_iterator(Flaky { yielded: 0 })).unwrap();
        assert_eq!(seq.try_next().unwrap(), Some(Value::Int(1)));
        assert_eq!(seq.try_next().unwrap_err(), EvalError::host("disk on fire"));
    }

    #[test]
    fn failed_cursor_is_returned_where_it_stopped() {
        let flaky = Value::host_iterator(Flaky { yielded: 0 });
        {
            let mut seq = adapt(flaky.clone()).unwrap();
            seq.try_next().unwrap();
            assert!(seq.try_next().is_err());
        }
        let mut seq = adapt(flaky).unwrap();
        assert_eq!(seq.try_next().unwrap(), Some(Value::Int(3)));
    }
}

#[test]
fn exhaustion_is_sticky() {
    let mut seq = adapt(Value::list(strs(&["only"]))).unwrap();
    assert_eq!(seq.try_next().unwrap(), Some(Value::string("only")));
    for _ in 0..3 {
        assert_eq!(seq.try_next().unwrap(), None);
    }
    assert!(format!("{seq:?}").contains("exhausted: true"));
}

#[test]
fn sequence_is_lazy() {
    let pulled = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulled);
    let source = Value::iterator((0..100).map(move |n| {
        counter.set(counter.get() + 1);
        Value::Int(n)
    }));
    let mut seq = adapt(source).unwrap();
    assert_eq!(pulled.get(), 0);
    seq.try_next().unwrap();
    seq.try_next().unwrap();
    // peeking for has_next reads one element ahead
    assert!(pulled.get() <= 3);
}
