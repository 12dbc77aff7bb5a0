//! The fixed sets of categories that income and expense transactions can be filed under.

use crate::transaction::TransactionType;

/// A label that a transaction can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// The label shown to the user, which is also the value stored on a transaction.
    pub name: &'static str,
    /// The colour used when displaying the category.
    pub color: &'static str,
}

/// The categories for money coming in.
pub const INCOME_CATEGORIES: &[Category] = &[
    Category { name: "Business", color: "#123123" },
    Category { name: "Investments", color: "#0f6b50" },
    Category { name: "Extra income", color: "#1b7e57" },
    Category { name: "Deposits", color: "#239864" },
    Category { name: "Lottery", color: "#2bb171" },
    Category { name: "Gifts", color: "#36c980" },
    Category { name: "Salary", color: "#4bdb92" },
    Category { name: "Savings", color: "#60e8a3" },
    Category { name: "Rental income", color: "#7ef0b5" },
];

/// The categories for money going out.
pub const EXPENSE_CATEGORIES: &[Category] = &[
    Category { name: "Bills", color: "#b50d12" },
    Category { name: "Car", color: "#bf373a" },
    Category { name: "Clothes", color: "#c94a4d" },
    Category { name: "Travel", color: "#d35d60" },
    Category { name: "Food", color: "#dd7073" },
    Category { name: "Shopping", color: "#e78386" },
    Category { name: "House", color: "#f19699" },
    Category { name: "Entertainment", color: "#f5a9ab" },
    Category { name: "Phone", color: "#f8bbbd" },
    Category { name: "Pets", color: "#fbcdce" },
    Category { name: "Other", color: "#fddfe0" },
];

/// The categories a user may pick from for `transaction_type`.
pub fn categories_for(transaction_type: TransactionType) -> &'static [Category] {
    match transaction_type {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// Work out the transaction type implied by `category`.
///
/// Returns `None` when `category` is not in either set, in which case the
/// caller should keep whatever type it already has.
pub fn derive_type(category: &str) -> Option<TransactionType> {
    if contains(INCOME_CATEGORIES, category) {
        Some(TransactionType::Income)
    } else if contains(EXPENSE_CATEGORIES, category) {
        Some(TransactionType::Expense)
    } else {
        None
    }
}

/// The display colour for `category`, if it is a known category.
pub fn category_color(category: &str) -> Option<&'static str> {
    INCOME_CATEGORIES
        .iter()
        .chain(EXPENSE_CATEGORIES)
        .find(|candidate| candidate.name == category)
        .map(|candidate| candidate.color)
}

fn contains(categories: &[Category], name: &str) -> bool {
    categories.iter().any(|category| category.name == name)
}
