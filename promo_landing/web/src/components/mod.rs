mod carousel;
mod hero;
mod promo_card;

pub use carousel::Carousel;
pub use hero::Hero;
pub use promo_card::PromoCard;
