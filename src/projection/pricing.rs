//! Price suggestion and break-even calculations

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::engine::BreakEvenPolicy;
use crate::campaign::PriceBasis;
use crate::error::{Error, Result};

/// Turn an overflowed checked operation into a configuration error
pub(crate) fn checked(value: Option<Decimal>, what: &str) -> Result<Decimal> {
    value.ok_or_else(|| Error::invalid(format!("{} is out of the representable range", what)))
}

/// `1 - pct/100`, rejecting percentages that leave nothing to divide by
fn markup_divisor(pct: Decimal, what: &str) -> Result<Decimal> {
    let divisor = Decimal::ONE - pct / Decimal::ONE_HUNDRED;
    if divisor <= Decimal::ZERO {
        return Err(Error::invalid(format!(
            "{} of {}% leaves no room for costs (must be below 100%)",
            what, pct
        )));
    }
    Ok(divisor)
}

/// Suggested per-module price that covers `total_period_cost` and leaves
/// `markup_pct` percent of revenue for the markup named by `markup_label`.
///
/// Quoted for the whole campaign, or per month when `basis` is monthly.
pub fn suggested_price(
    total_period_cost: Decimal,
    module_capacity: u32,
    markup_pct: Decimal,
    markup_label: &str,
    months: u32,
    basis: PriceBasis,
) -> Result<Decimal> {
    if module_capacity == 0 {
        return Err(Error::invalid("bag has no module capacity"));
    }
    let divisor = markup_divisor(markup_pct, markup_label)?;

    let per_module = total_period_cost / Decimal::from(module_capacity);
    let per_campaign = checked(per_module.checked_div(divisor), "suggested price")?;
    Ok(match basis {
        PriceBasis::TotalContract => per_campaign,
        PriceBasis::Monthly => per_campaign / Decimal::from(months),
    })
}

/// Break-even figure under an explicit policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEven {
    pub policy: BreakEvenPolicy,

    /// Revenue at which net profit is zero
    pub revenue: Decimal,

    /// Module sales needed to reach `revenue`
    pub modules: Decimal,

    /// Module sales the campaign can offer under the same policy
    pub available_modules: Decimal,
}

impl BreakEven {
    pub fn exceeds_capacity(&self) -> bool {
        self.modules > self.available_modules
    }
}

fn require_positive_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(Error::invalid(format!(
            "sell price must be positive to compute break-even, got {}",
            price
        )));
    }
    Ok(())
}

/// Revenue month 1 alone must bring in to cover setup costs, one month of
/// fixed costs and its own commission.
///
/// With `commission_on_setup` false, commission is only charged on revenue
/// above the setup costs, so setup is recovered before commission applies.
pub fn single_month_break_even(
    setup_costs: Decimal,
    fixed_monthly: Decimal,
    commission_pct: Decimal,
    commission_on_setup: bool,
    monthly_price: Decimal,
    module_capacity: u32,
) -> Result<BreakEven> {
    require_positive_price(monthly_price)?;
    let divisor = markup_divisor(commission_pct, "commission")?;

    let revenue = if commission_on_setup {
        setup_costs
            .checked_add(fixed_monthly)
            .and_then(|costs| costs.checked_div(divisor))
    } else {
        fixed_monthly
            .checked_div(divisor)
            .and_then(|fixed| fixed.checked_add(setup_costs))
    };
    let revenue = checked(revenue, "break-even revenue")?;
    let modules = checked(revenue.checked_div(monthly_price), "break-even modules")?;

    Ok(BreakEven {
        policy: BreakEvenPolicy::SingleMonth,
        revenue,
        modules,
        available_modules: Decimal::from(module_capacity),
    })
}

/// Module sales, spread over the campaign, that recoup every cost on the
/// statement.
pub fn whole_campaign_break_even(
    total_cost: Decimal,
    sale_price: Decimal,
    available_modules: Decimal,
) -> Result<BreakEven> {
    require_positive_price(sale_price)?;
    let modules = checked(total_cost.checked_div(sale_price), "break-even modules")?;

    Ok(BreakEven {
        policy: BreakEvenPolicy::WholeCampaign,
        revenue: total_cost,
        modules,
        available_modules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_price_total_contract() {
        // (4531.50 + 600 + 1180) / 36 / (1 - 0.5) = 350.6388...
        let price = suggested_price(
            Decimal::new(631150, 2),
            36,
            Decimal::new(50, 0),
            "margin",
            1,
            PriceBasis::TotalContract,
        )
        .unwrap();
        assert_eq!(price.round_dp(2), Decimal::new(35064, 2));
    }

    #[test]
    fn test_suggested_price_monthly_divides_by_months() {
        let cost = Decimal::from(10800);
        let total =
            suggested_price(cost, 36, Decimal::ZERO, "margin", 3, PriceBasis::TotalContract)
                .unwrap();
        let monthly =
            suggested_price(cost, 36, Decimal::ZERO, "margin", 3, PriceBasis::Monthly).unwrap();
        assert_eq!(total, Decimal::from(300));
        assert_eq!(monthly, Decimal::from(100));
    }

    #[test]
    fn test_suggested_price_rejects_full_markup() {
        let cost = Decimal::from(3600);
        let result =
            suggested_price(cost, 36, Decimal::ONE_HUNDRED, "margin", 1, PriceBasis::Monthly);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));

        let result =
            suggested_price(cost, 36, Decimal::from(120), "margin", 1, PriceBasis::Monthly);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_suggested_price_error_names_markup() {
        let cost = Decimal::from(3600);
        let err = suggested_price(cost, 36, Decimal::ONE_HUNDRED, "margin", 1, PriceBasis::Monthly)
            .unwrap_err();
        assert!(err.to_string().contains("margin of 100%"));
    }

    #[test]
    fn test_suggested_price_overflow_is_an_error() {
        // A margin just below 100% leaves a divisor of 1e-28
        let margin = Decimal::from_str_exact("99.99999999999999999999999999").unwrap();
        let result = suggested_price(
            Decimal::new(631150, 2),
            36,
            margin,
            "margin",
            1,
            PriceBasis::Monthly,
        );
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_break_even_overflow_is_an_error() {
        let tiny = Decimal::new(1, 28);
        let result = whole_campaign_break_even(Decimal::from(14071), tiny, Decimal::from(36));
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));

        let result = single_month_break_even(
            Decimal::from(5131),
            Decimal::from(1180),
            Decimal::from(10),
            true,
            tiny,
            36,
        );
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_single_month_break_even() {
        // (4531.50 + 600 + 1180) / 0.9 = 7012.777...
        let be = single_month_break_even(
            Decimal::new(513150, 2),
            Decimal::from(1180),
            Decimal::from(10),
            true,
            Decimal::from(500),
            36,
        )
        .unwrap();

        assert_eq!(be.policy, BreakEvenPolicy::SingleMonth);
        assert_eq!(be.revenue.round_dp(2), Decimal::new(701278, 2));
        assert_eq!(be.modules.round_dp(2), Decimal::new(1403, 2));
        assert!(!be.exceeds_capacity());
    }

    #[test]
    fn test_single_month_break_even_commission_after_setup() {
        let be = single_month_break_even(
            Decimal::from(5000),
            Decimal::from(900),
            Decimal::from(10),
            false,
            Decimal::from(100),
            36,
        )
        .unwrap();
        // 5000 + 900 / 0.9
        assert_eq!(be.revenue, Decimal::from(6000));
        assert_eq!(be.modules, Decimal::from(60));
        assert!(be.exceeds_capacity());
    }

    #[test]
    fn test_break_even_requires_positive_price() {
        let available = Decimal::from(36);
        assert!(whole_campaign_break_even(Decimal::from(100), Decimal::ZERO, available).is_err());
        assert!(single_month_break_even(
            Decimal::from(100),
            Decimal::from(10),
            Decimal::ZERO,
            true,
            Decimal::from(-1),
            36,
        )
        .is_err());
    }

    #[test]
    fn test_whole_campaign_break_even() {
        let be = whole_campaign_break_even(
            Decimal::new(811150, 2),
            Decimal::from(500),
            Decimal::from(36),
        )
        .unwrap();
        assert_eq!(be.modules, Decimal::new(16223, 3));
        assert_eq!(be.revenue, Decimal::new(811150, 2));
    }
}
