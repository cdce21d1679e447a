//! One convenience call per catalog entry.
//!
//! Each method binds its canonical wire name and delegates to the
//! generic [`Client::call`] primitive, so version gating, parameter
//! shaping, and response parsing behave identically whichever entry
//! point is used. Parameters stay untyped `serde_json::Value`s: the
//! daemon owns the per-method schema.

use serde_json::Value;

use crate::client::Client;
use crate::error::Error;

macro_rules! rpc_methods {
    ($( $(#[$attr:meta])* $fn_name:ident => $rpc_name:literal; )+) => {
        impl Client {
            $(
                $(#[$attr])*
                pub async fn $fn_name(&self, params: Vec<Value>) -> Result<Value, Error> {
                    self.call($rpc_name, params).await
                }
            )+
        }

        #[cfg(test)]
        const BOUND_METHODS: &[&str] = &[$($rpc_name),+];
    };
}

rpc_methods! {
    // Blockchain
    /// Hash of the best block in the longest chain.
    get_best_block_hash => "getbestblockhash";
    /// Block data for a block hash.
    get_block => "getblock";
    /// Chain state summary. Daemons older than 2.1.0 do not serve this.
    get_blockchain_info => "getblockchaininfo";
    get_block_count => "getblockcount";
    get_block_hash => "getblockhash";
    get_difficulty => "getdifficulty";
    get_hashes_per_sec => "gethashespersec";
    get_raw_mempool => "getrawmempool";
    get_tx_out => "gettxout";
    get_tx_out_set_info => "gettxoutsetinfo";
    get_work => "getwork";
    get_work_ex => "getworkex";
    verify_chain => "verifychain";

    // Control
    get_info => "getinfo";
    /// Daemon help text; with a method name argument, help for that method.
    help => "help";
    /// Ask the daemon to shut down.
    stop => "stop";

    // Generating
    get_generate => "getgenerate";
    set_generate => "setgenerate";

    // Mining
    get_block_template => "getblocktemplate";
    get_mining_info => "getmininginfo";
    get_network_hash_ps => "getnetworkhashps";
    submit_block => "submitblock";

    // Network
    add_node => "addnode";
    get_added_node_info => "getaddednodeinfo";
    get_connection_count => "getconnectioncount";
    /// Network state summary. Daemons older than 2.1.0 do not serve this.
    get_network_info => "getnetworkinfo";
    get_peer_info => "getpeerinfo";

    // Raw transactions
    create_raw_transaction => "createrawtransaction";
    decode_raw_transaction => "decoderawtransaction";
    get_raw_transaction => "getrawtransaction";
    send_raw_transaction => "sendrawtransaction";
    /// Sign a raw transaction. Private keys passed as the third argument
    /// are masked in trace logs.
    sign_raw_transaction => "signrawtransaction";

    // Util
    create_multisig => "createmultisig";
    validate_address => "validateaddress";
    verify_message => "verifymessage";

    // Wallet
    add_multisig_address => "addmultisigaddress";
    backup_wallet => "backupwallet";
    /// Reveals the private key for an address; the response is masked in
    /// trace logs.
    dump_priv_key => "dumpprivkey";
    encrypt_wallet => "encryptwallet";
    get_account => "getaccount";
    get_account_address => "getaccountaddress";
    get_addresses_by_account => "getaddressesbyaccount";
    get_balance => "getbalance";
    get_new_address => "getnewaddress";
    get_normalized_tx_id => "getnormalizedtxid";
    get_received_by_account => "getreceivedbyaccount";
    get_received_by_address => "getreceivedbyaddress";
    get_transaction => "gettransaction";
    import_priv_key => "importprivkey";
    key_pool_refill => "keypoolrefill";
    list_accounts => "listaccounts";
    list_address_groupings => "listaddressgroupings";
    list_lock_unspent => "listlockunspent";
    list_received_by_account => "listreceivedbyaccount";
    list_received_by_address => "listreceivedbyaddress";
    list_since_block => "listsinceblock";
    list_transactions => "listtransactions";
    list_unspent => "listunspent";
    lock_unspent => "lockunspent";
    /// Move funds between accounts (the daemon's `move` call).
    move_funds => "move";
    send_from => "sendfrom";
    send_many => "sendmany";
    send_to_address => "sendtoaddress";
    set_account => "setaccount";
    set_min_input => "setmininput";
    set_tx_fee => "settxfee";
    sign_message => "signmessage";
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::BOUND_METHODS;
    use crate::catalog;
    use crate::client::{Client, Config};
    use crate::transport::mock::MockTransport;
    use serde_json::{json, Value};

    #[test]
    fn every_catalog_entry_has_a_bound_method_and_vice_versa() {
        let bound: BTreeSet<&str> = BOUND_METHODS.iter().copied().collect();
        let cataloged: BTreeSet<&str> = catalog::METHODS.iter().map(|m| m.name).collect();
        assert_eq!(bound, cataloged);
        assert_eq!(BOUND_METHODS.len(), catalog::METHODS.len(), "no duplicates");
    }

    #[tokio::test]
    async fn bound_method_delegates_to_generic_call() {
        let transport = Arc::new(
            MockTransport::new().reply(r#"{ "result": 170, "error": null, "id": 1 }"#),
        );
        let client = Client::with_transport(&Config::default(), transport.clone())
            .expect("client must construct");

        let count = client.get_block_count(Vec::new()).await.expect("call must succeed");
        assert_eq!(count, json!(170));

        let wire: Value =
            serde_json::from_str(&transport.requests()[0]).expect("request must be JSON");
        assert_eq!(wire["method"], json!("getblockcount"));
    }
}
