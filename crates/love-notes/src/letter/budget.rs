use serde::Serialize;

/// Display-only limit for the letter body. Longer bodies are accepted.
pub const BODY_SOFT_LIMIT: usize = 800;

const WARNING_ABOVE: usize = 500;
const DANGER_ABOVE: usize = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetLevel {
    Normal,
    Warning,
    Danger,
}

/// Body length as shown by the character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharBudget {
    pub used: usize,
    pub limit: usize,
    pub level: BudgetLevel,
}

impl CharBudget {
    /// Counts UTF-16 code units, the unit browsers report for text length.
    pub fn measure(body: &str) -> Self {
        let used = body.encode_utf16().count();
        let level = if used > DANGER_ABOVE {
            BudgetLevel::Danger
        } else if used > WARNING_ABOVE {
            BudgetLevel::Warning
        } else {
            BudgetLevel::Normal
        };

        Self {
            used,
            limit: BODY_SOFT_LIMIT,
            level,
        }
    }

    pub fn counter(&self) -> String {
        format!("{}/{}", self.used, self.limit)
    }

    pub fn over_limit(&self) -> bool {
        self.used > self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_switch_after_thresholds() {
        assert_eq!(CharBudget::measure("").level, BudgetLevel::Normal);
        assert_eq!(CharBudget::measure(&"a".repeat(500)).level, BudgetLevel::Normal);
        assert_eq!(CharBudget::measure(&"a".repeat(501)).level, BudgetLevel::Warning);
        assert_eq!(CharBudget::measure(&"a".repeat(700)).level, BudgetLevel::Warning);
        assert_eq!(CharBudget::measure(&"a".repeat(701)).level, BudgetLevel::Danger);
    }

    #[test]
    fn limit_is_not_enforced() {
        let budget = CharBudget::measure(&"x".repeat(900));
        assert_eq!(budget.counter(), "900/800");
        assert!(budget.over_limit());
    }

    #[test]
    fn emoji_count_as_two_units() {
        assert_eq!(CharBudget::measure("❤️💖").used, 4);
    }
}
