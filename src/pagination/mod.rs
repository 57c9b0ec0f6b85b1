mod urls;

pub use urls::build_paginated_url_with_params;
