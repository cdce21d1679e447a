//! Static catalog of the RPC methods exposed by `vdinard`.
//!
//! Each descriptor records the canonical (lower-case) method name, the
//! daemon category it belongs to, the minimum daemon version that serves
//! it, optional per-feature version ranges, and optional obfuscation
//! hooks that mask credential material before request or response bodies
//! are handed to the logger. The table is consumed read-only; support
//! decisions against a declared daemon version are made once, in
//! [`crate::version::Capabilities`].

use serde_json::Value;

/// Daemon-side grouping of an RPC method, as reported by `help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Blockchain,
    Control,
    Generating,
    Mining,
    Network,
    RawTransactions,
    Util,
    Wallet,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Blockchain => "blockchain",
            Category::Control => "control",
            Category::Generating => "generating",
            Category::Mining => "mining",
            Category::Network => "network",
            Category::RawTransactions => "rawtransactions",
            Category::Util => "util",
            Category::Wallet => "wallet",
        }
    }
}

/// In-place transformation applied to a logged copy of request
/// parameters or a response result. Never applied to the wire payload.
pub type ObfuscateFn = fn(&mut Value);

/// A sub-capability of a method gated by its own version range,
/// independent of the method's minimum version.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub name: &'static str,
    pub constraint: &'static str,
}

/// One entry of the method catalog.
#[derive(Debug, Clone, Copy)]
pub struct MethodDescriptor {
    /// Canonical lower-case method name as sent on the wire.
    pub name: &'static str,
    pub category: Category,
    /// Semver range the declared daemon version must satisfy.
    pub min_version: &'static str,
    pub features: &'static [Feature],
    pub obfuscate_request: Option<ObfuscateFn>,
    pub obfuscate_response: Option<ObfuscateFn>,
}

const fn method(name: &'static str, category: Category, min_version: &'static str) -> MethodDescriptor {
    MethodDescriptor {
        name,
        category,
        min_version,
        features: &[],
        obfuscate_request: None,
        obfuscate_response: None,
    }
}

/// Every RPC method known to the client, sorted by canonical name.
pub const METHODS: &[MethodDescriptor] = &[
    method("addmultisigaddress", Category::Wallet, ">=1.0.0"),
    method("addnode", Category::Network, ">=1.0.0"),
    method("backupwallet", Category::Wallet, ">=1.0.0"),
    method("createmultisig", Category::Util, ">=1.0.0"),
    method("createrawtransaction", Category::RawTransactions, ">=1.0.0"),
    method("decoderawtransaction", Category::RawTransactions, ">=1.0.0"),
    MethodDescriptor {
        name: "dumpprivkey",
        category: Category::Wallet,
        min_version: ">=1.0.0",
        features: &[],
        obfuscate_request: None,
        obfuscate_response: Some(mask_entire),
    },
    MethodDescriptor {
        name: "encryptwallet",
        category: Category::Wallet,
        min_version: ">=1.0.0",
        features: &[],
        obfuscate_request: Some(mask_encrypt_wallet),
        obfuscate_response: None,
    },
    method("getaccount", Category::Wallet, ">=1.0.0"),
    method("getaccountaddress", Category::Wallet, ">=1.0.0"),
    method("getaddednodeinfo", Category::Network, ">=1.0.0"),
    method("getaddressesbyaccount", Category::Wallet, ">=1.0.0"),
    method("getbalance", Category::Wallet, ">=0.0.0"),
    method("getbestblockhash", Category::Blockchain, ">=1.0.0"),
    method("getblock", Category::Blockchain, ">=1.0.0"),
    method("getblockchaininfo", Category::Blockchain, ">=2.1.0"),
    method("getblockcount", Category::Blockchain, ">=1.0.0"),
    method("getblockhash", Category::Blockchain, ">=1.0.0"),
    method("getblocktemplate", Category::Mining, ">=1.0.0"),
    method("getconnectioncount", Category::Network, ">=1.0.0"),
    method("getdifficulty", Category::Blockchain, ">=1.0.0"),
    method("getgenerate", Category::Generating, ">=1.0.0"),
    method("gethashespersec", Category::Blockchain, ">=1.0.0"),
    method("getinfo", Category::Control, ">=1.0.0"),
    method("getmininginfo", Category::Mining, ">=1.0.0"),
    method("getnetworkhashps", Category::Mining, ">=1.0.0"),
    method("getnetworkinfo", Category::Network, ">=2.1.0"),
    method("getnewaddress", Category::Wallet, ">=1.0.0"),
    method("getnormalizedtxid", Category::Wallet, ">=1.0.0"),
    method("getpeerinfo", Category::Network, ">=1.0.0"),
    method("getrawmempool", Category::Blockchain, ">=1.0.0"),
    method("getrawtransaction", Category::RawTransactions, ">=1.0.0"),
    method("getreceivedbyaccount", Category::Wallet, ">=1.0.0"),
    method("getreceivedbyaddress", Category::Wallet, ">=1.0.0"),
    method("gettransaction", Category::Wallet, ">=1.0.0"),
    method("gettxout", Category::Blockchain, ">=1.0.0"),
    method("gettxoutsetinfo", Category::Blockchain, ">=1.0.0"),
    method("getwork", Category::Blockchain, ">=1.0.0"),
    method("getworkex", Category::Blockchain, ">=1.0.0"),
    method("help", Category::Control, ">=1.0.0"),
    MethodDescriptor {
        name: "importprivkey",
        category: Category::Wallet,
        min_version: ">=1.0.0",
        features: &[],
        obfuscate_request: Some(mask_import_priv_key),
        obfuscate_response: None,
    },
    method("keypoolrefill", Category::Wallet, ">=1.0.0"),
    method("listaccounts", Category::Wallet, ">=1.0.0"),
    method("listaddressgroupings", Category::Wallet, ">=1.0.0"),
    method("listlockunspent", Category::Wallet, ">=1.0.0"),
    method("listreceivedbyaccount", Category::Wallet, ">=1.0.0"),
    method("listreceivedbyaddress", Category::Wallet, ">=1.0.0"),
    method("listsinceblock", Category::Wallet, ">=1.0.0"),
    method("listtransactions", Category::Wallet, ">=1.0.0"),
    method("listunspent", Category::Wallet, ">=1.0.0"),
    method("lockunspent", Category::Wallet, ">=1.0.0"),
    method("move", Category::Wallet, ">=1.0.0"),
    method("sendfrom", Category::Wallet, ">=1.0.0"),
    method("sendmany", Category::Wallet, ">=1.0.0"),
    method("sendrawtransaction", Category::RawTransactions, ">=1.0.0"),
    method("sendtoaddress", Category::Wallet, ">=1.0.0"),
    method("setaccount", Category::Wallet, ">=1.0.0"),
    method("setgenerate", Category::Generating, ">=1.0.0"),
    method("setmininput", Category::Wallet, ">=1.0.0"),
    method("settxfee", Category::Wallet, ">=1.0.0"),
    method("signmessage", Category::Wallet, ">=1.0.0"),
    MethodDescriptor {
        name: "signrawtransaction",
        category: Category::RawTransactions,
        min_version: ">=1.0.0",
        features: &[],
        obfuscate_request: Some(mask_sign_raw_transaction),
        obfuscate_response: None,
    },
    method("stop", Category::Control, ">=1.0.0"),
    method("submitblock", Category::Mining, ">=1.0.0"),
    method("validateaddress", Category::Util, ">=1.0.0"),
    method("verifychain", Category::Blockchain, ">=1.0.0"),
    method("verifymessage", Category::Util, ">=1.0.0"),
];

/// Look up a descriptor by method name, case-insensitively.
pub fn find(name: &str) -> Option<&'static MethodDescriptor> {
    METHODS.iter().find(|m| m.name.eq_ignore_ascii_case(name))
}

// ==============================================================================
// Obfuscation hooks
// ==============================================================================

const MASK: &str = "******";

fn mask_entire(value: &mut Value) {
    *value = Value::from(MASK);
}

/// `encryptwallet` takes the passphrase as its first positional argument
/// (or `passphrase` in named form).
fn mask_encrypt_wallet(params: &mut Value) {
    match params {
        Value::Array(items) => {
            if let Some(passphrase) = items.first_mut() {
                *passphrase = Value::from(MASK);
            }
        }
        Value::Object(fields) => {
            if let Some(passphrase) = fields.get_mut("passphrase") {
                *passphrase = Value::from(MASK);
            }
        }
        _ => {}
    }
}

/// `importprivkey` carries the key as the whole point of the call, so the
/// positional list is collapsed to a single mask.
fn mask_import_priv_key(params: &mut Value) {
    match params {
        Value::Array(_) => {
            *params = Value::Array(vec![Value::from(MASK)]);
        }
        Value::Object(fields) => {
            if let Some(privkey) = fields.get_mut("privkey") {
                *privkey = Value::from(MASK);
            }
        }
        _ => {}
    }
}

/// `signrawtransaction` takes an optional list of private keys as its
/// third positional argument (or `privkeys` in named form).
fn mask_sign_raw_transaction(params: &mut Value) {
    let keys = match params {
        Value::Array(items) => items.get_mut(2),
        Value::Object(fields) => fields.get_mut("privkeys"),
        _ => None,
    };
    if let Some(Value::Array(keys)) = keys {
        for key in keys {
            *key = Value::from(MASK);
        }
    }
}
