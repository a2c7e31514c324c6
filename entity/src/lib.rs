pub use sea_orm;

pub mod access_token;
pub mod cart;
pub mod cart_item;
pub mod category;
pub mod food;
pub mod order;
pub mod order_item;
pub mod payment_session;
pub mod review;
pub mod user;

pub use access_token::Entity as AccessToken;
pub use cart::Entity as Cart;
pub use cart_item::Entity as CartItem;
pub use category::Entity as Category;
pub use food::Entity as Food;
pub use order::Entity as Order;
pub use order::OrderStatus;
pub use order_item::Entity as OrderItem;
pub use payment_session::Entity as PaymentSession;
pub use review::Entity as Review;
pub use user::Entity as User;
