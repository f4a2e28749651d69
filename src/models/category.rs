//! Transaction categories
//!
//! A category is a closed sum type with two families, income and expense,
//! each carrying one member of a fixed enumeration. The family doubles as
//! the transaction kind, so dispatching on it needs no runtime type checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Macro to generate a closed, uppercase-named category enumeration
macro_rules! define_category_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical uppercase name
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Case-insensitive lookup by name
            pub fn parse(s: &str) -> Option<Self> {
                let upper = s.trim().to_uppercase();
                Self::ALL.iter().copied().find(|c| c.name() == upper)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

define_category_set!(
    /// Sources of income
    IncomeCategory {
        Salary => "SALARY",
        Commission => "COMMISSION",
        SelfEmployment => "SELFEMPLOYMENT",
        Investment => "INVESTMENT",
        Interest => "INTEREST",
        Retirement => "RETIREMENT",
        Business => "BUSINESS",
        Rental => "RENTAL",
        Subsidary => "SUBSIDARY",
        CapitalGain => "CAPITALGAIN",
        Royalties => "ROYALTIES",
        SideHustle => "SIDEHUSTLE",
        Miscellaneous => "MISCELLANEOUS",
        Other => "OTHER",
    }
);

define_category_set!(
    /// Kinds of spending
    ExpenseCategory {
        Housing => "HOUSING",
        Healthcare => "HEALTHCARE",
        Transportation => "TRANSPORTATION",
        Education => "EDUCATION",
        Childcare => "CHILDCARE",
        Grocery => "GROCERY",
        Entertainment => "ENTERTAINMENT",
        Clothing => "CLOTHING",
        PersonalCare => "PERSONALCARE",
        Insurance => "INSURANCE",
        Utilities => "UTILITIES",
        Telecommunication => "TELECOMMUNICATION",
        Miscellaneous => "MISCELLANEOUS",
        Other => "OTHER",
    }
);

/// The two families a transaction can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Discriminator label, also used as the record type prefix
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Parse a kind from a label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" | "expenses" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Map the `is_income` flag used by range queries
    pub fn from_is_income(is_income: bool) -> Self {
        if is_income {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A category tagged with its family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "name")]
pub enum Category {
    Income(IncomeCategory),
    Expense(ExpenseCategory),
}

impl Category {
    /// Resolve a name, trying the income set before the expense set.
    ///
    /// Names present in both sets (MISCELLANEOUS, OTHER) therefore resolve
    /// to income.
    pub fn parse(name: &str) -> Result<Self, LedgerError> {
        if let Some(income) = IncomeCategory::parse(name) {
            return Ok(Self::Income(income));
        }
        if let Some(expense) = ExpenseCategory::parse(name) {
            return Ok(Self::Expense(expense));
        }
        Err(LedgerError::UnknownCategory(name.to_string()))
    }

    /// Resolve a name within a single family
    pub fn parse_in(kind: TransactionKind, name: &str) -> Result<Self, LedgerError> {
        let found = match kind {
            TransactionKind::Income => IncomeCategory::parse(name).map(Self::Income),
            TransactionKind::Expense => ExpenseCategory::parse(name).map(Self::Expense),
        };
        found.ok_or_else(|| LedgerError::UnknownCategory(name.to_string()))
    }

    /// Canonical uppercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Income(c) => c.name(),
            Self::Expense(c) => c.name(),
        }
    }

    /// The family this category belongs to
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Income(_) => TransactionKind::Income,
            Self::Expense(_) => TransactionKind::Expense,
        }
    }

    /// "Income" or "Expense"
    pub fn type_label(&self) -> &'static str {
        self.kind().label()
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income(_))
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense(_))
    }

    /// All categories of one family, in enumeration order
    pub fn all_of(kind: TransactionKind) -> Vec<Category> {
        match kind {
            TransactionKind::Income => IncomeCategory::ALL
                .iter()
                .copied()
                .map(Self::Income)
                .collect(),
            TransactionKind::Expense => ExpenseCategory::ALL
                .iter()
                .copied()
                .map(Self::Expense)
                .collect(),
        }
    }
}

impl From<IncomeCategory> for Category {
    fn from(c: IncomeCategory) -> Self {
        Self::Income(c)
    }
}

impl From<ExpenseCategory> for Category {
    fn from(c: ExpenseCategory) -> Self {
        Self::Expense(c)
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
