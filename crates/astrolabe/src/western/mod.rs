pub mod houses;
pub mod rulers;

pub use houses::{house_of, house_rulers, HouseRuler};
pub use rulers::{get_sign_index, get_sign_name, get_sign_ruler, RulerConvention, SIGN_GLYPHS, SIGN_NAMES};
