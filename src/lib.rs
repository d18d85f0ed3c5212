pub use util::*;

mod util;

solutions![(y2022, [d1, d2, d3])];
