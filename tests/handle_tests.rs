//! Integration tests for opaque handles through exported functions.

use std::ptr;

use forbind::{ForeignType, Opaque, Registry, Scalar, Taken, export_bindings, handle, last_error};

/// A small stack exported behind a handle.
#[derive(Debug, Clone, Default, PartialEq, Opaque)]
#[forbind(clone)]
pub struct Stack {
    items: Vec<i32>,
}

impl Stack {
    fn push(&mut self, value: i32) {
        self.items.push(value);
    }

    fn pop(&mut self) -> i32 {
        self.items.pop().unwrap_or_default()
    }

    fn top(&self) -> i32 {
        self.items.last().copied().unwrap_or_default()
    }

    fn empty(&self) -> bool {
        self.items.is_empty()
    }
}

export_bindings! {
    fn stack_new() -> Stack = Stack::default;
    fn stack_push(&mut Stack, i32) = Stack::push;
    fn stack_pop(&mut Stack) -> i32 = Stack::pop;
    fn stack_top(&Stack) -> i32 = Stack::top;
    fn stack_empty(&Stack) -> bool = Stack::empty;
    fn stack_copy(Stack) -> Stack = |stack: Stack| stack;
    fn stack_peek(&Stack) -> &Stack = |stack| stack;
    fn stack_drain(Taken<Stack>) -> i32 = |stack: Taken<Stack>| stack.items.len() as i32;
    fn stack_raw_len(*mut Stack) -> i32 = |stack: *mut Stack| {
        unsafe { stack.as_ref() }.map_or(-1, |stack| stack.items.len() as i32)
    };
}

#[test]
fn test_stack_round_trip_matches_direct_calls() {
    let mut direct = Stack::default();

    unsafe {
        let stack = stack_new();
        assert!(!stack.is_null());
        assert_eq!(stack_empty(stack), direct.empty());

        for value in [3, 7, 11] {
            stack_push(stack, value);
            direct.push(value);
        }
        assert_eq!(stack_top(stack), direct.top());
        assert_eq!(stack_pop(stack), direct.pop());
        assert_eq!(stack_top(stack), direct.top());
        assert_eq!(stack_empty(stack), direct.empty());
        assert_eq!(handle::deref::<Stack>(stack).unwrap(), &direct);

        handle::gen_release(stack);
    }
}

#[test]
fn test_stack_copy_is_independent() {
    unsafe {
        let stack = stack_new();
        stack_push(stack, 1);

        let copy = stack_copy(stack);
        stack_push(copy, 2);
        assert_eq!(stack_top(stack), 1);
        assert_eq!(stack_top(copy), 2);

        let peeked = stack_peek(stack);
        assert_ne!(peeked, stack);
        assert_eq!(stack_top(peeked), 1);

        handle::release(peeked);
        handle::release(copy);
        handle::release(stack);
    }
}

#[test]
fn test_taken_value_leaves_default_behind() {
    unsafe {
        let stack = stack_new();
        stack_push(stack, 4);
        stack_push(stack, 5);

        assert_eq!(stack_drain(stack), 2);
        assert!(stack_empty(stack));

        handle::release(stack);
    }
}

#[test]
fn test_class_pointer_passes_null_through() {
    unsafe {
        assert_eq!(stack_raw_len(ptr::null_mut()), -1);

        let stack = stack_new();
        stack_push(stack, 9);
        assert_eq!(stack_raw_len(stack), 1);
        handle::release(stack);
    }
    assert_eq!(last_error(), None);
}

#[test]
fn test_null_handle_reports_error() {
    unsafe {
        assert_eq!(stack_top(ptr::null_mut()), 0);
        let message = last_error().expect("error recorded");
        assert!(message.starts_with("stack_top: "), "{message}");
        assert!(message.contains("`Stack`"), "{message}");

        assert!(stack_copy(ptr::null_mut()).is_null());

        let stack = stack_new();
        assert_eq!(last_error(), None);
        handle::release(stack);
    }
}

#[test]
fn test_handle_lifecycle() {
    let cell = forbind::into_handle(Stack::default());
    unsafe {
        handle::deref_mut::<Stack>(cell).unwrap().push(42);
        assert_eq!(handle::deref::<Stack>(cell).unwrap().top(), 42);
        handle::release(cell);
    }
}

#[test]
fn test_stack_signatures() {
    let registry = Registry::collect().unwrap();
    assert_eq!(Stack::NAME, "Stack");

    let push = registry.get("stack_push").unwrap();
    assert!(push.signature.is_subroutine());
    assert_eq!(push.signature.params[0].foreign, ForeignType::Handle);
    assert_eq!(push.signature.params[1].foreign, ForeignType::Scalar(Scalar::I32));

    let empty = registry.get("stack_empty").unwrap();
    assert_eq!(empty.signature.result, ForeignType::Scalar(Scalar::Bool));

    let new = registry.get("stack_new").unwrap();
    assert!(new.signature.params.is_empty());
    assert_eq!(new.signature.result, ForeignType::Handle);

    assert!(registry.contains("gen_release"));
}
