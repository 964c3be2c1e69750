//! Derived trade figures: realized P&L, return on position value and planned
//! risk/reward.

use crate::enums::TradeDirection;
use rust_decimal::Decimal;

/// Realized P&L of a position closed at `exit_price`.
///
/// `None` when the position value does not fit in a `Decimal`.
pub fn realized_pnl(
    direction: TradeDirection,
    entry_price: Decimal,
    exit_price: Decimal,
    quantity: Decimal,
) -> Option<Decimal> {
    let entry_value = entry_price.checked_mul(quantity)?;
    let exit_value = exit_price.checked_mul(quantity)?;
    match direction {
        TradeDirection::Long => exit_value.checked_sub(entry_value),
        TradeDirection::Short => entry_value.checked_sub(exit_value),
    }
}

/// P&L as a percentage of the position's entry value.
///
/// `None` when the entry value is zero or the result overflows.
pub fn pnl_percent(profit_loss: Decimal, entry_price: Decimal, quantity: Decimal) -> Option<Decimal> {
    let entry_value = entry_price.checked_mul(quantity)?;
    if entry_value.is_zero() {
        return None;
    }
    profit_loss
        .checked_div(entry_value)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Reward distance over risk distance, measured from the entry price.
///
/// `None` unless both levels are set and the stop sits away from the entry.
pub fn risk_reward(
    entry_price: Decimal,
    stop_loss: Option<Decimal>,
    take_profit: Option<Decimal>,
) -> Option<Decimal> {
    let (stop_loss, take_profit) = (stop_loss?, take_profit?);
    let risk = (entry_price - stop_loss).abs();
    if risk <= Decimal::ZERO {
        return None;
    }
    let reward = (take_profit - entry_price).abs();
    reward.checked_div(risk)
}
