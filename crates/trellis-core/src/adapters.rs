//! Small callback roles used by widgets that read application state or emit
//! actions. Both are implemented for plain closures.

/// Pulls a value out of application state each frame.
pub trait Retriever<T> {
    fn get(&self) -> T;
}

impl<T, F: Fn() -> T> Retriever<T> for F {
    fn get(&self) -> T {
        self()
    }
}

/// Turns a widget-level value into an application action.
pub trait Generator<T, A> {
    fn generate(&self, value: T) -> A;
}

impl<T, A, F: Fn(T) -> A> Generator<T, A> for F {
    fn generate(&self, value: T) -> A {
        self(value)
    }
}

