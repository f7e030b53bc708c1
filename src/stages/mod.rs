pub mod stage0_parse;
pub mod stage1_normalize;
pub mod stage2_select;
pub mod stage3_synthesize;

pub use stage0_parse::*;
pub use stage1_normalize::*;
pub use stage2_select::*;
pub use stage3_synthesize::*;
