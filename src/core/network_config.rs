use super::constants::DEMO_TOKEN_ID;
use super::contract::parse_quantity;
use super::wallet::TxHash;

/// Chain, contract address and outbound link bases of the demo deployment
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub display_name: &'static str,
    /// Network segment of marketplace asset paths
    pub slug: &'static str,
    pub chain_id: u64,
    pub contract_address: &'static str,
    pub explorer_url: &'static str,
    pub marketplace_url: &'static str,
}

impl NetworkConfig {
    /// The demo contract only exists on Rinkeby
    const RINKEBY: NetworkConfig = NetworkConfig {
        display_name: "Rinkeby",
        slug: "rinkeby",
        chain_id: 4,
        contract_address: "0x86fbbb1254c39602a7b067d5ae7e5c2bdfd61a30",
        explorer_url: "https://rinkeby.etherscan.io",
        marketplace_url: "https://testnets.opensea.io",
    };

    /// Configuration of the deployed demo contract
    pub fn demo() -> &'static NetworkConfig {
        &Self::RINKEBY
    }

    /// Chain id as the `0x`-prefixed quantity wallets report from `eth_chainId`
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }

    /// Whether an `eth_chainId` result names this network
    pub fn is_chain(&self, reported: &str) -> bool {
        parse_quantity(reported).is_ok_and(|id| id == self.chain_id)
    }

    /// Block explorer page of a submitted transaction
    pub fn explorer_tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_url, hash)
    }

    /// Marketplace page of the demo token
    ///
    /// `token_contract` is the receipt's `to` address when known; the
    /// configured contract address is used otherwise.
    pub fn marketplace_asset_url(&self, token_contract: Option<&str>) -> String {
        let address = token_contract.unwrap_or(self.contract_address);
        format!(
            "{}/assets/{}/{}/{}",
            self.marketplace_url, self.slug, address, DEMO_TOKEN_ID
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_link_uses_transaction_hash() {
        let config = NetworkConfig::demo();
        let hash = TxHash::new("0xABC");
        assert_eq!(config.explorer_tx_url(&hash), "https://rinkeby.etherscan.io/tx/0xABC");
    }

    #[test]
    fn test_marketplace_link_prefers_receipt_address() {
        let config = NetworkConfig::demo();
        assert_eq!(
            config.marketplace_asset_url(Some("0xdead")),
            "https://testnets.opensea.io/assets/rinkeby/0xdead/1"
        );
        assert_eq!(
            config.marketplace_asset_url(None),
            "https://testnets.opensea.io/assets/rinkeby/0x86fbbb1254c39602a7b067d5ae7e5c2bdfd61a30/1"
        );
    }

    #[test]
    fn test_chain_matching() {
        let config = NetworkConfig::demo();
        assert_eq!(config.chain_id_hex(), "0x4");
        assert!(config.is_chain("0x4"));
        assert!(config.is_chain("0x04"));
        assert!(!config.is_chain("0x1"));
        assert!(!config.is_chain("0xaa36a7"));
        assert!(!config.is_chain("garbage"));
    }
}
