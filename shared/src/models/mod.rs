//! Domain Models
//!
//! Catalog entities are live, mutable rows managed by admin operations.
//! Order entities are immutable price snapshots written exactly once at
//! submission time; only `orders.status` may change afterwards.

pub mod category;
pub mod option_group;
pub mod order;
pub mod product;
pub mod voucher;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use option_group::{
    OptionGroup, OptionGroupCreate, OptionGroupUpdate, OptionValue, OptionValueCreate,
    OptionValueUpdate, OptionValueWithGroup, SelectionType,
};
pub use order::{
    DeliveryMethod, Order, OrderItem, OrderItemOption, OrderStatus, PaymentMethod,
};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use voucher::{Voucher, VoucherCreate, VoucherKind, VoucherUpdate};
