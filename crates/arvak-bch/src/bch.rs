//! Truncated Baker-Campbell-Hausdorff expansion.
//!
//! For non-commuting operators x and y, `z = log(e^x · e^y)` is
//!
//!   z = x + y
//!     + [x,y]/2
//!     + [x,[x,y]]/12 + [y,[y,x]]/12
//!     − [y,[x,[x,y]]]/24
//!     − [y,[y,[y,[y,x]]]]/720 − [x,[x,[x,[x,y]]]]/720
//!     + [x,[y,[y,[y,x]]]]/360 + [y,[x,[x,[x,y]]]]/360
//!     + [y,[x,[y,[x,y]]]]/120 + [x,[y,[x,[y,x]]]]/120
//!     + …
//!
//! where each line is one order. Orders above [`MAX_ORDER`](crate::order::MAX_ORDER)
//! are rejected rather than silently truncated.
//!
//! # Example
//!
//! ```rust
//! use arvak_bch::bch_expand;
//! use ndarray::array;
//!
//! let x = array![[0.0, 0.1], [0.0, 0.0]];
//! let y = array![[0.0, 0.0], [0.1, 0.0]];
//! let z = bch_expand(&x, &y, 2).unwrap();
//! assert_eq!(z.dim(), (2, 2));
//! ```

use tracing::{debug, trace};

use crate::commutator::commutator;
use crate::error::{BchError, BchResult};
use crate::operator::Operator;
use crate::order::Order;

/// Compute the BCH expansion of `log(e^x · e^y)` truncated at `order`.
///
/// Checks run in a fixed sequence and the first failure is returned:
/// order domain ([`BchError::InvalidOrder`]), order bound
/// ([`BchError::UnsupportedOrder`]), then operand compatibility
/// ([`BchError::ShapeMismatch`] for dense matrices). That `x` and `y` share
/// one concrete type is enforced by the signature; see
/// [`bch_expand_any`](crate::request::bch_expand_any) for the dynamic form.
pub fn bch_expand<T, O>(x: &T, y: &T, order: O) -> BchResult<T>
where
    T: Operator,
    O: TryInto<Order>,
    BchError: From<O::Error>,
{
    let mut series = bch_series(x, y, order)?.into_iter();
    // The series always starts with the order-0 term x + y.
    let z = series.next().unwrap_or_else(|| x.plus(y));
    Ok(series.fold(z, |z, term| z.plus(&term)))
}

/// The incremental BCH contribution of each order `0..=order`.
///
/// Element `k` holds exactly the order-k terms, so the sum of the first
/// `k + 1` elements equals `bch_expand(x, y, k)`. Validation is identical to
/// [`bch_expand`].
pub fn bch_series<T, O>(x: &T, y: &T, order: O) -> BchResult<Vec<T>>
where
    T: Operator,
    O: TryInto<Order>,
    BchError: From<O::Error>,
{
    let order: Order = order.try_into()?;
    x.check_compatible(y)?;

    debug!(kind = T::KIND, order = order.get(), "expanding BCH series");
    Ok(Cascade::new(x, y).terms(order))
}

/// Nested commutators shared between orders.
///
/// Each bracket is computed at most once; brackets that are sign flips of
/// one already held (`[y,x] = −[x,y]`) are derived from it.
struct Cascade<'a, T> {
    x: &'a T,
    y: &'a T,
}

impl<'a, T: Operator> Cascade<'a, T> {
    fn new(x: &'a T, y: &'a T) -> Self {
        Self { x, y }
    }

    fn terms(&self, order: Order) -> Vec<T> {
        let (x, y) = (self.x, self.y);
        let order = order.get();
        let mut terms = Vec::with_capacity(usize::from(order) + 1);

        terms.push(x.plus(y));
        if order < 1 {
            return terms;
        }

        let c_xy = commutator(x, y);
        terms.push(c_xy.divide(2.0));
        trace!(order = 1, "BCH term added");
        if order < 2 {
            return terms;
        }

        // [x,[x,y]] and [y,[y,x]]
        let c_xxy = commutator(x, &c_xy);
        let c_yyx = commutator(y, &c_xy.negated());
        terms.push(c_xxy.divide(12.0).plus(&c_yyx.divide(12.0)));
        trace!(order = 2, "BCH term added");
        if order < 3 {
            return terms;
        }

        // −[y,[x,[x,y]]]/24
        let c_yxxy = commutator(y, &c_xxy);
        terms.push(c_yxxy.divide(24.0).negated());
        trace!(order = 3, "BCH term added");
        if order < 4 {
            return terms;
        }

        let c_xxxy = commutator(x, &c_xxy);
        let c_yyyx = commutator(y, &c_yyx);
        let c_xyyx = commutator(x, &c_yyx);

        // −[y,[y,[y,[y,x]]]]/720 − [x,[x,[x,[x,y]]]]/720
        let t_yyyyx = commutator(y, &c_yyyx).divide(720.0);
        let t_xxxxy = commutator(x, &c_xxxy).divide(720.0);
        // +[x,[y,[y,[y,x]]]]/360 + [y,[x,[x,[x,y]]]]/360
        let t_xyyyx = commutator(x, &c_yyyx).divide(360.0);
        let t_yxxxy = commutator(y, &c_xxxy).divide(360.0);
        // [y,[x,[y,[x,y]]]] = −[y,[x,[y,[y,x]]]]
        let t_yxyxy = commutator(y, &c_xyyx).divide(120.0);
        // [x,[y,[x,[y,x]]]] = −[x,[y,[x,[x,y]]]]
        let t_xyxyx = commutator(x, &c_yxxy).divide(120.0);

        let fourth = t_xyyyx
            .plus(&t_yxxxy)
            .minus(&t_yyyyx)
            .minus(&t_xxxxy)
            .minus(&t_yxyxy)
            .minus(&t_xyxyx);
        terms.push(fourth);
        trace!(order = 4, "BCH term added");

        terms
    }
}
