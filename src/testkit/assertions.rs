//! Assertion macros for `Result`-returning analysis operations.
//!
//! - [`crate::assert_result_ok!`] unwraps an `Ok`, reporting the error otherwise
//! - [`crate::assert_result_err!`] unwraps an `Err`, reporting the value otherwise
//! - [`crate::assert_contains_error!`] checks the error's display text
//!
//! ```rust
//! use conflictmap::{assert_contains_error, assert_result_ok};
//! use conflictmap::ingest::{normalize, AliasTable};
//!
//! let records = assert_result_ok!(normalize("Story,Component\nUS-1,ClassA\n", &AliasTable::builtin()));
//! assert_eq!(records.len(), 1);
//!
//! assert_contains_error!(normalize("Story\nUS-1\n", &AliasTable::builtin()), "component_id");
//! ```

/// Assert that a Result is Ok and yield the value.
#[macro_export]
macro_rules! assert_result_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!(
                "Expected Ok, got Err: {:?}\n  at {}:{}",
                e,
                file!(),
                line!()
            ),
        }
    };
    ($result:expr, $($msg:tt)+) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!(
                "{}: Expected Ok, got Err: {:?}\n  at {}:{}",
                format!($($msg)+),
                e,
                file!(),
                line!()
            ),
        }
    };
}

/// Assert that a Result is Err and yield the error.
#[macro_export]
macro_rules! assert_result_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err, got Ok: {:?}\n  at {}:{}",
                value,
                file!(),
                line!()
            ),
            Err(e) => e,
        }
    };
}

/// Assert that a Result is Err and its message contains `pattern`.
#[macro_export]
macro_rules! assert_contains_error {
    ($result:expr, $pattern:expr) => {{
        let err = $crate::assert_result_err!($result);
        let text = err.to_string();
        assert!(
            text.contains($pattern),
            "Error '{}' does not contain '{}'\n  at {}:{}",
            text,
            $pattern,
            file!(),
            line!()
        );
        err
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::ConflictError;

    #[test]
    fn ok_yields_value() {
        let result: Result<usize, ConflictError> = Ok(3);
        assert_eq!(assert_result_ok!(result, "records for {}", "deployment"), 3);
    }

    #[test]
    #[should_panic(expected = "Expected Ok, got Err")]
    fn ok_panics_on_error() {
        let result: Result<usize, ConflictError> = Err(ConflictError::empty_input("baseline"));
        let _ = assert_result_ok!(result);
    }

    #[test]
    #[should_panic(expected = "Expected Err, got Ok")]
    fn err_panics_on_value() {
        let result: Result<usize, ConflictError> = Ok(1);
        let _ = assert_result_err!(result);
    }

    #[test]
    fn contains_error_matches_display_text() {
        let result: Result<(), ConflictError> = Err(ConflictError::config("bad threshold"));
        let err = assert_contains_error!(result, "bad threshold");
        assert!(err.is_user_fixable());
    }
}
