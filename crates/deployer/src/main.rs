//! One-shot deployment of the gate token contract
//!
//! Reads env configuration, submits a contract-creation transaction bound to
//! the existing NFT collection address, blocks until the network confirms
//! it, and prints the deployed address. There is no retry and no rollback:
//! a failed run exits non-zero and the operator re-runs it; a repeated run
//! deploys a second, distinct contract.

use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolValue;
use anyhow::{bail, Context, Result};
use eth_client::EthClient;
use serde::Deserialize;
use tokengate_core::RpcConfig;

/// Compiled contract artifact, hardhat- or foundry-shaped
#[derive(Debug, Deserialize)]
struct ContractArtifact {
    bytecode: ArtifactBytecode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// hardhat layout: `"bytecode": "0x..."`
    Plain(String),
    /// foundry layout: `"bytecode": { "object": "0x..." }`
    Object { object: String },
}

impl ArtifactBytecode {
    fn decode(&self) -> Result<Vec<u8>> {
        let raw = match self {
            Self::Plain(s) => s,
            Self::Object { object } => object,
        };
        let raw = raw.strip_prefix("0x").unwrap_or(raw);
        hex::decode(raw).context("artifact bytecode is not valid hex")
    }
}

/// Creation bytecode with the ABI-encoded constructor argument appended.
fn deploy_code(artifact: &ContractArtifact, nft_address: Address) -> Result<Vec<u8>> {
    let mut code = artifact.bytecode.decode()?;
    if code.is_empty() {
        bail!("artifact bytecode is empty");
    }
    code.extend(nft_address.abi_encode());
    Ok(code)
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is not set"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tokengate=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let rpc = RpcConfig {
        url: std::env::var("TOKENGATE_RPC_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8545".to_string()),
        wallet_key: env_var("TOKENGATE_DEPLOYER_KEY")?,
    };
    let nft_address: Address = env_var("TOKENGATE_NFT_ADDRESS")?
        .parse()
        .context("TOKENGATE_NFT_ADDRESS is not a valid address")?;
    let artifact_path = std::env::var("TOKENGATE_TOKEN_ARTIFACT")
        .unwrap_or_else(|_| "artifacts/GateToken.json".to_string());

    let client = EthClient::connect_any_network(rpc).await?;
    tracing::info!(
        url = client.url(),
        chain_id = client.chain_id(),
        deployer = %client.signer_address(),
        "connected"
    );

    let funding = client.native_balance(client.signer_address()).await?;
    tracing::info!(balance_wei = %funding, "deployer balance");

    let artifact: ContractArtifact = serde_json::from_str(
        &std::fs::read_to_string(&artifact_path)
            .with_context(|| format!("could not read artifact {artifact_path}"))?,
    )
    .with_context(|| format!("could not parse artifact {artifact_path}"))?;

    let code = deploy_code(&artifact, nft_address)?;
    tracing::info!(bytes = code.len(), nft = %nft_address, "submitting contract creation");

    let tx = TransactionRequest::default().with_deploy_code(code);
    let pending = client.send_transaction(tx).await?;
    let receipt = client.wait_for_receipt(pending).await?;

    if !receipt.status() {
        bail!("deployment transaction {} reverted", receipt.transaction_hash);
    }
    let address = receipt
        .contract_address
        .context("receipt carries no contract address")?;

    println!("Gate token contract address: {address}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hardhat_artifact() {
        let artifact: ContractArtifact =
            serde_json::from_str(r#"{"bytecode": "0x6001600101"}"#).unwrap();
        assert_eq!(artifact.bytecode.decode().unwrap(), vec![0x60, 0x01, 0x60, 0x01, 0x01]);
    }

    #[test]
    fn test_parse_foundry_artifact() {
        let artifact: ContractArtifact =
            serde_json::from_str(r#"{"bytecode": {"object": "0x60016001"}}"#).unwrap();
        assert_eq!(artifact.bytecode.decode().unwrap(), vec![0x60, 0x01, 0x60, 0x01]);
    }

    #[test]
    fn test_bad_hex_is_rejected() {
        let artifact: ContractArtifact =
            serde_json::from_str(r#"{"bytecode": "0xzz"}"#).unwrap();
        assert!(artifact.bytecode.decode().is_err());
    }

    #[test]
    fn test_deploy_code_appends_constructor_word() {
        let artifact: ContractArtifact =
            serde_json::from_str(r#"{"bytecode": "0x6001600101"}"#).unwrap();
        let nft = Address::repeat_byte(0xab);

        let code = deploy_code(&artifact, nft).unwrap();

        // bytecode followed by one 32-byte word, address right-aligned
        assert_eq!(code.len(), 5 + 32);
        assert!(code[5..5 + 12].iter().all(|b| *b == 0));
        assert_eq!(&code[5 + 12..], nft.as_slice());
    }

    #[test]
    fn test_empty_bytecode_is_rejected() {
        let artifact: ContractArtifact = serde_json::from_str(r#"{"bytecode": "0x"}"#).unwrap();
        assert!(deploy_code(&artifact, Address::ZERO).is_err());
    }
}
