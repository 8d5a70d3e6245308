/// Report liveness, and which build is answering.
#[tracing::instrument]
pub async fn handler() -> &'static str {
    concat!("whales-server ", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_success() {
        assert!(handler().await.starts_with("whales-server "));
    }
}
