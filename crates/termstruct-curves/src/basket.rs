//! Basket validation and ordering.
//!
//! The spot bootstrap reuses shorter instruments' rates for longer
//! instruments' coupons, so the basket must be on one reference date and in
//! ascending maturity order before any rate is solved.

use std::borrow::Cow;

use log::debug;

use termstruct_bonds::BondObservation;
use termstruct_core::Date;

use crate::config::BasketOrdering;
use crate::error::{CurveError, CurveResult};

/// Minimum number of instruments needed to interpolate onto pillars.
pub const MIN_INSTRUMENTS: usize = 2;

/// Validates a basket and returns it in ascending maturity order.
///
/// Returns the input unchanged (borrowed) when it is already ordered.
///
/// # Errors
///
/// - [`CurveError::InsufficientInstruments`] for fewer than 2 observations
/// - [`CurveError::ReferenceDateMismatch`] if any observation is on another date
/// - [`CurveError::NonMonotonicMaturities`] for duplicate maturities, or for
///   out-of-order maturities under [`BasketOrdering::Strict`]
pub fn prepare_basket(
    basket: &[BondObservation],
    reference_date: Date,
    ordering: BasketOrdering,
) -> CurveResult<Cow<'_, [BondObservation]>> {
    if basket.len() < MIN_INSTRUMENTS {
        return Err(CurveError::InsufficientInstruments {
            required: MIN_INSTRUMENTS,
            actual: basket.len(),
        });
    }

    if let Some(obs) = basket.iter().find(|o| o.reference_date() != reference_date) {
        return Err(CurveError::ReferenceDateMismatch {
            identifier: obs.identifier().to_string(),
            expected: reference_date,
            got: obs.reference_date(),
        });
    }

    let ascending = basket
        .windows(2)
        .all(|w| w[0].maturity() < w[1].maturity());
    if ascending {
        return Ok(Cow::Borrowed(basket));
    }

    let basket = match ordering {
        BasketOrdering::Strict => {
            check_strictly_ascending(basket)?;
            Cow::Borrowed(basket)
        }
        BasketOrdering::Sort => {
            let mut sorted = basket.to_vec();
            sorted.sort_by_key(BondObservation::maturity);
            check_strictly_ascending(&sorted)?;
            debug!(
                "basket for {reference_date} re-ordered by maturity ({} instruments)",
                sorted.len()
            );
            Cow::Owned(sorted)
        }
    };

    Ok(basket)
}

fn check_strictly_ascending(basket: &[BondObservation]) -> CurveResult<()> {
    match basket
        .windows(2)
        .find(|w| w[1].maturity() <= w[0].maturity())
    {
        Some(w) => Err(CurveError::NonMonotonicMaturities {
            identifier: w[1].identifier().to_string(),
            maturity: w[1].maturity(),
            previous: w[0].identifier().to_string(),
            previous_maturity: w[0].maturity(),
        }),
        None => Ok(()),
    }
}
