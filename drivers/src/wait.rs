/*++

Licensed under the Apache-2.0 license.

File Name:

    wait.rs

Abstract:

    File contains common functions and macros to implement wait routines.

--*/

/// Poll `predicate` until it holds or `budget` polls have been spent.
///
/// `keep_alive` runs every `interval` polls while waiting.
///
/// # Returns
///
/// * `bool` - True if the predicate held within the budget
pub fn until_with_budget<F, K>(budget: u32, interval: u32, mut keep_alive: K, mut predicate: F) -> bool
where
    F: FnMut() -> bool,
    K: FnMut(),
{
    for poll in 0..budget {
        if predicate() {
            return true;
        }
        if interval != 0 && poll % interval == interval - 1 {
            keep_alive();
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_exhausted() {
        let mut polls = 0;
        let mut pings = 0;
        let done = until_with_budget(
            10,
            4,
            || pings += 1,
            || {
                polls += 1;
                false
            },
        );
        assert!(!done);
        assert_eq!(polls, 10);
        assert_eq!(pings, 2);
    }

    #[test]
    fn test_predicate_met() {
        let mut polls = 0;
        assert!(until_with_budget(10, 0, || {}, || {
            polls += 1;
            polls == 3
        }));
        assert_eq!(polls, 3);
        assert!(!until_with_budget(0, 0, || {}, || true));
    }
}
