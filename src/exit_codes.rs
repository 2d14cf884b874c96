//! Exit code constants for the destyle CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Class id collision (two declarations hash to the same class)
//! - 3: I/O failure (document or stylesheet unreadable/unwritable)
//! - 4: Lock acquisition failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Two distinct normalized declarations produced the same class id.
pub const HASH_COLLISION: i32 = 2;

/// A document or the stylesheet could not be read or written.
pub const IO_FAILURE: i32 = 3;

/// The stylesheet lock is held by another run.
pub const LOCK_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, HASH_COLLISION, IO_FAILURE, LOCK_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
