//! Execution engine fixture.
//!
//! Understands exactly one contract: a single-slot `SimpleStorage` with
//! `set(uint256)` and `get()`. Deployment returns everything after the
//! constructor prefix, which is how the compiled constructor behaves. A few
//! single-byte commands drive account updates and removals so the state
//! policies can be exercised through the router.

use ledger_evm::domain::{Account, Word};
use ledger_evm::errors::EngineError;
use ledger_evm::ports::{EngineCall, ExecutionEngine, StateManager};
use std::cell::Cell;

/// Constructor plus runtime, as emitted by solc for `SimpleStorage`.
pub const DEPLOY_BYTECODE: &str = "6060604052341561000f57600080fd5b60d38061001d6000396000f3006060604052600436106049576000357c0100000000000000000000000000000000000000000000000000000000900463ffffffff16806360fe47b114604e5780636d4ce63c14606e575b600080fd5b3415605857600080fd5b606c60048080359060200190919050506094565b005b3415607857600080fd5b607e609e565b6040518082815260200191505060405180910390f35b8060008190555050565b600080549050905600a165627a7a72305820122f55f799d70b5f6dbfd4312efb65cdbfaacddedf7c36249b8b1e915a8dd85b0029";

/// Byte offset where the runtime code starts inside [`DEPLOY_BYTECODE`].
pub const RUNTIME_OFFSET: usize = 0x1d;

/// `set(uint256)` selector.
pub const SET_SELECTOR: &str = "60fe47b1";

/// `get()` selector.
pub const GET_SELECTOR: &str = "6d4ce63c";

/// Removes the callee account.
pub const REMOVE_COMMAND: u8 = 0xff;

/// Replaces the callee code with the bytes that follow.
pub const UPDATE_COMMAND: u8 = 0xf0;

/// Gas charged for running a constructor.
pub const DEPLOY_COST: u64 = 32_000;

/// Gas charged for a storage write.
pub const SSTORE_COST: u64 = 20_000;

/// Gas charged for a storage read.
pub const SLOAD_COST: u64 = 800;

/// Gas charged for account updates and removals.
pub const ACCOUNT_COST: u64 = 5_000;

/// Runtime code installed by a deployment of [`DEPLOY_BYTECODE`].
pub fn runtime_bytecode() -> Vec<u8> {
    deploy_bytecode().split_off(RUNTIME_OFFSET)
}

/// Decoded [`DEPLOY_BYTECODE`].
pub fn deploy_bytecode() -> Vec<u8> {
    hex::decode(DEPLOY_BYTECODE).unwrap_or_default()
}

/// Hex call input for `set(value)`.
pub fn set_input(value: u64) -> String {
    format!("{SET_SELECTOR}{}", hex::encode(Word::from(value).as_bytes()))
}

/// Hex-encoded 32-byte word, as `get()` returns it.
pub fn word_output(value: u64) -> Vec<u8> {
    Word::from(value).as_bytes().to_vec()
}

/// Interprets `SimpleStorage`.
#[derive(Debug, Default)]
pub struct SimpleStorageEngine {
    executions: Cell<usize>,
}

impl SimpleStorageEngine {
    /// Create an engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the engine ran.
    pub fn executions(&self) -> usize {
        self.executions.get()
    }

    fn charge(gas: &mut u64, cost: u64) -> Result<(), EngineError> {
        *gas = gas.checked_sub(cost).ok_or(EngineError::OutOfGas)?;
        Ok(())
    }

    fn construct(call: &EngineCall<'_>, gas: &mut u64) -> Result<Vec<u8>, EngineError> {
        Self::charge(gas, DEPLOY_COST)?;
        Ok(call.code.get(RUNTIME_OFFSET..).unwrap_or_default().to_vec())
    }

    fn run(
        state: &mut dyn StateManager,
        call: &EngineCall<'_>,
        gas: &mut u64,
    ) -> Result<Vec<u8>, EngineError> {
        let callee = call.callee.address;

        match call.input {
            [REMOVE_COMMAND] => {
                Self::charge(gas, ACCOUNT_COST)?;
                state.remove_account(callee)?;
                return Ok(Vec::new());
            }
            [UPDATE_COMMAND, code @ ..] => {
                Self::charge(gas, ACCOUNT_COST)?;
                state.update_account(&Account::new(callee, code.to_vec()))?;
                return Ok(Vec::new());
            }
            _ => {}
        }

        // Plain value transfer to an account without code.
        if call.code.is_empty() {
            return Ok(Vec::new());
        }

        let (selector, args) = call.input.split_at(call.input.len().min(4));
        match hex::encode(selector).as_str() {
            SET_SELECTOR => {
                Self::charge(gas, SSTORE_COST)?;
                state.set_storage(callee, Word::ZERO, Word::from_slice_padded(args))?;
                Ok(Vec::new())
            }
            GET_SELECTOR => {
                Self::charge(gas, SLOAD_COST)?;
                let value = state.get_storage(callee, Word::ZERO)?;
                Ok(value.as_bytes().to_vec())
            }
            other => Err(EngineError::Reverted(format!("unknown selector 0x{other}"))),
        }
    }
}

impl ExecutionEngine for SimpleStorageEngine {
    fn call(
        &self,
        state: &mut dyn StateManager,
        call: EngineCall<'_>,
        gas: &mut u64,
    ) -> Result<Vec<u8>, EngineError> {
        self.executions.set(self.executions.get() + 1);

        if call.callee.has_code() || call.code != call.input {
            Self::run(state, &call, gas)
        } else {
            Self::construct(&call, gas)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_offset() {
        let runtime = runtime_bytecode();
        assert_eq!(runtime.len(), deploy_bytecode().len() - RUNTIME_OFFSET);
        assert_eq!(&runtime[..4], &[0x60, 0x60, 0x60, 0x40]);
    }

    #[test]
    fn test_set_input_layout() {
        let input = hex::decode(set_input(42)).unwrap();
        assert_eq!(input.len(), 36);
        assert_eq!(input[35], 42);
    }
}
