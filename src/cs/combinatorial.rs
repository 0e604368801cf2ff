pub mod dancing_links;
pub mod exact_cover;
pub mod random_instance;

pub use dancing_links::SparseMatrix;
pub use exact_cover::{
    cover, is_exact_cover, solve_exact_cover, uncover, ExactCoverSearch, SearchConfig,
    SearchOutcome, SearchStats,
};
pub use random_instance::{random_rows, random_rows_with_cover};
