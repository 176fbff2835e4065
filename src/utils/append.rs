//! Order-preserving append helpers for any [`Extend`] container.
//!
//! [`add_range!`](crate::add_range) takes its values as separate arguments,
//! [`add_to_container`] takes anything iterable. Both append after the
//! existing contents and keep the given order.

/// Append every item of `values` to the end of `container`, in order.
///
/// ```
/// # use hexwalk::utils::add_to_container;
/// let mut numbers = vec![0];
/// add_to_container(&mut numbers, [1, 2, 3]);
/// assert_eq!(numbers, [0, 1, 2, 3]);
/// ```
pub fn add_to_container<C, I>(container: &mut C, values: I)
where
    C: Extend<I::Item>,
    I: IntoIterator,
{
    container.extend(values);
}

/// Append any number of values to the end of a container, in order.
///
/// The container can be anything implementing [`Extend`] for the value type.
/// With no values the container is left untouched.
///
/// ```
/// # use hexwalk::add_range;
/// let mut numbers = Vec::new();
/// add_range!(numbers, 1, 2, 3, 4, 5);
/// assert_eq!(numbers, [1, 2, 3, 4, 5]);
/// ```
#[macro_export]
macro_rules! add_range {
    ($container:expr $(,)?) => {{
        let _ = &mut $container;
    }};
    ($container:expr, $($value:expr),+ $(,)?) => {{
        $crate::utils::add_to_container(&mut $container, [$($value),+]);
    }};
}
