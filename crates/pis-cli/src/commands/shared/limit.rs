/// Compute effective limit with precedence: local arg -> configured default.
#[must_use]
pub fn effective_limit(local: Option<u32>, configured: u32) -> u32 {
    local.filter(|limit| *limit > 0).unwrap_or(configured)
}
