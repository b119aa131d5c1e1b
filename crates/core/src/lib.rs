//! Loomline Core - Shared types and computation core.
//!
//! This crate provides the types and pure logic used across all Loomline
//! components:
//! - `storefront` - Public-facing catalog, cart, and checkout site
//! - `admin` - Internal back-office panel
//! - `cli` - Command-line management tools
//!
//! # Architecture
//!
//! The core crate contains only types and total functions - no I/O, no HTTP,
//! no async. Everything here can be called from any context and tested
//! without a network.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, product categories, and the price policy
//! - [`catalog`] - Catalog items and the inspiration grouping engine
//! - [`pipeline`] - The category-filter / text-search / sort pipeline
//! - [`cart`] - The shopper cart and its total computation
//! - [`checkout`] - Order payload construction and validation
//! - [`orders`] - Orders as returned by the remote API, plus dashboard stats
//! - [`inquiries`] - Custom-project inquiries from the contact form

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod inquiries;
pub mod orders;
pub mod pipeline;
pub mod types;

pub use cart::{Cart, CartItem};
pub use catalog::{CatalogItem, ProductSortField, group_by_inspiration};
pub use checkout::{CheckoutError, CustomerDetails, NewOrder, NewOrderItem, build_order};
pub use inquiries::{CustomInquiry, InquirySortField, InquiryStats};
pub use orders::{DashboardStats, Order, OrderItem, OrderSortField, StatusFilter};
pub use pipeline::{Listable, SortConfig, SortDirection, apply};
pub use types::*;
