//! One-shot notices shown as a toast after a redirect.
//!
//! Mutating handlers redirect back to a page with `?notice=<kind>`; the page
//! turns the kind into a message. Unknown kinds are ignored.

use serde::Deserialize;

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AddedToCart,
    UpdatedCartQuantity,
    AddedToWishlist,
    RemovedFromWishlist,
    RemovedFromCart,
    MovedToWishlist,
    MovedToCart,
    CopiedToCart,
    CheckoutComplete,
}

impl Notice {
    /// Query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddedToCart => "added-to-cart",
            Self::UpdatedCartQuantity => "updated-cart-quantity",
            Self::AddedToWishlist => "added-to-wishlist",
            Self::RemovedFromWishlist => "removed-from-wishlist",
            Self::RemovedFromCart => "removed-from-cart",
            Self::MovedToWishlist => "moved-to-wishlist",
            Self::MovedToCart => "moved-to-cart",
            Self::CopiedToCart => "copied-to-cart",
            Self::CheckoutComplete => "checkout-complete",
        }
    }

    /// Parse a query parameter value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        [
            Self::AddedToCart,
            Self::UpdatedCartQuantity,
            Self::AddedToWishlist,
            Self::RemovedFromWishlist,
            Self::RemovedFromCart,
            Self::MovedToWishlist,
            Self::MovedToCart,
            Self::CopiedToCart,
            Self::CheckoutComplete,
        ]
        .into_iter()
        .find(|notice| notice.as_str() == value)
    }

    /// Toast text. `subject` is the product title when the page knows it;
    /// without one the message leaves the product unnamed.
    #[must_use]
    pub fn message(self, subject: Option<&str>) -> String {
        let subject = subject.map(|title| format!(" {title}")).unwrap_or_default();
        match self {
            Self::AddedToCart | Self::CopiedToCart => format!("Added{subject} to cart"),
            Self::UpdatedCartQuantity => format!("Updated{subject} quantity in cart"),
            Self::AddedToWishlist => format!("Added{subject} to wishlist"),
            Self::RemovedFromWishlist => format!("Removed{subject} from wishlist"),
            Self::RemovedFromCart => format!("Removed{subject} from cart"),
            Self::MovedToWishlist => format!("Moved{subject} to wishlist"),
            Self::MovedToCart => format!("Moved{subject} to cart"),
            Self::CheckoutComplete => "Checkout successful".to_string(),
        }
    }

    /// Append this notice to `path`.
    #[must_use]
    pub fn redirect_target(self, path: &str) -> String {
        format!("{path}?notice={}", self.as_str())
    }
}

/// `?notice=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    /// The notice, if present and known.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::parse)
    }
}

/// A toast ready for display.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
}

impl Toast {
    /// Build the toast for `query`, naming `subject` where the message allows.
    #[must_use]
    pub fn from_query(query: &NoticeQuery, subject: Option<&str>) -> Option<Self> {
        query.notice().map(|notice| Self {
            message: notice.message(subject),
        })
    }
}
