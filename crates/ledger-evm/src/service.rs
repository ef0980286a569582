//! # Invocation Router
//!
//! Entry point the host ledger drives once per transaction.
//!
//! ```text
//! ParseArgs ──► ResolveIdentity ──► Dispatch ──► Respond
//!     │                               ├─ Deploy   (callee == zero)
//!     │                               ├─ Call     (callee != zero)
//!     └──────── sentinel ────────────►└─ GetCode  (no identity, no engine)
//! ```
//!
//! Every failure becomes an error [`Response`]. Writes issued before a
//! failure are left in the ledger view for the host to discard.

use crate::adapters::state_adapter::LedgerStateManager;
use crate::adapters::X509IdentityResolver;
use crate::config::RouterConfig;
use crate::domain::entities::{Account, Invocation, Response};
use crate::domain::services::derive_contract_address;
use crate::domain::value_objects::Address;
use crate::errors::InvocationError;
use crate::ports::inbound::InvocationApi;
use crate::ports::outbound::{EngineCall, ExecutionEngine, IdentityResolver, LedgerStore};
use crate::sequence::next_sequence;
use tracing::{debug, info, info_span, instrument, warn, Dispatch};

/// Number of positional arguments every invocation carries.
pub const EXPECTED_ARGS: usize = 2;

/// Routes invocations to deploy, call or code retrieval.
pub struct EvmLedgerService<E: ExecutionEngine, I: IdentityResolver = X509IdentityResolver> {
    /// Router configuration.
    config: RouterConfig,
    /// Bytecode interpreter.
    engine: E,
    /// Caller identity resolver.
    resolver: I,
    /// Tracing capability every invocation runs under.
    dispatch: Dispatch,
}

impl<E: ExecutionEngine> EvmLedgerService<E> {
    /// Router with the X.509 identity resolver.
    pub fn with_x509(engine: E, config: RouterConfig) -> Self {
        Self::new(engine, X509IdentityResolver::new(), config)
    }
}

impl<E: ExecutionEngine, I: IdentityResolver> EvmLedgerService<E, I> {
    /// Create a router. Logging is discarded until a dispatch is supplied
    /// with [`with_dispatch`](Self::with_dispatch).
    pub fn new(engine: E, resolver: I, config: RouterConfig) -> Self {
        Self {
            config,
            engine,
            resolver,
            dispatch: Dispatch::none(),
        }
    }

    /// Routes this service's spans and events to `dispatch`.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The execution engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Decodes two positional arguments into an [`Invocation`].
    ///
    /// Pure: touches neither the ledger nor the identity resolver.
    pub fn parse_invocation(&self, args: &[Vec<u8>]) -> Result<Invocation, InvocationError> {
        let [target, data] = args else {
            return Err(InvocationError::ArgumentCount(args.len()));
        };

        match self.code_target(target, data) {
            Some(code_target) => Ok(Invocation::GetCode { target: code_target? }),
            None => Transaction::decode(target, data).map(Invocation::from),
        }
    }

    /// Runs constructor bytecode and installs the returned runtime code
    /// at a freshly derived address. Returns the new address.
    pub fn deploy<L>(
        &self,
        ledger: &mut L,
        caller: Address,
        payload: &[u8],
    ) -> Result<Address, InvocationError>
    where
        L: LedgerStore + ?Sized,
    {
        self.traced(|| self.run_deploy(ledger, caller, payload))
    }

    /// Runs the code stored at `callee` and returns the raw output.
    pub fn call<L>(
        &self,
        ledger: &mut L,
        caller: Address,
        callee: Address,
        input: &[u8],
    ) -> Result<Vec<u8>, InvocationError>
    where
        L: LedgerStore + ?Sized,
    {
        self.traced(|| self.run_call(ledger, caller, callee, input))
    }

    /// Code stored at `target`; empty when there is none.
    pub fn get_code<L>(&self, ledger: &mut L, target: Address) -> Result<Vec<u8>, InvocationError>
    where
        L: LedgerStore + ?Sized,
    {
        self.traced(|| self.read_code(ledger, target))
    }

    /// Runs `f` with this service's dispatch as the default subscriber.
    fn traced<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    #[instrument(skip_all, fields(caller = %caller, payload_len = payload.len()))]
    fn run_deploy<L>(
        &self,
        ledger: &mut L,
        caller: Address,
        payload: &[u8],
    ) -> Result<Address, InvocationError>
    where
        L: LedgerStore + ?Sized,
    {
        let mut state = self.state(ledger);

        let sequence = next_sequence(&mut state, caller)?;
        let address = derive_contract_address(caller, sequence);

        let caller_account = Account::empty(caller);
        let contract = Account::empty(address);
        let mut gas = self.config.deploy_gas;

        let code = self.engine.call(
            &mut state,
            EngineCall {
                caller: &caller_account,
                callee: &contract,
                code: payload,
                input: payload,
                value: 0,
            },
            &mut gas,
        )?;
        debug!(
            contract = %address,
            gas_used = self.config.deploy_gas.saturating_sub(gas),
            gas_remaining = gas,
            "Constructor finished"
        );

        if code.is_empty() {
            return Err(InvocationError::CodeNotFound(address));
        }

        state.install_code(address, &code)?;
        info!(
            caller = %caller,
            contract = %address,
            sequence,
            code_len = code.len(),
            "Contract deployed"
        );
        Ok(address)
    }

    #[instrument(skip_all, fields(caller = %caller, callee = %callee))]
    fn run_call<L>(
        &self,
        ledger: &mut L,
        caller: Address,
        callee: Address,
        input: &[u8],
    ) -> Result<Vec<u8>, InvocationError>
    where
        L: LedgerStore + ?Sized,
    {
        let mut state = self.state(ledger);

        let callee_account = state.get_code(callee).map(|code| Account::new(callee, code))?;
        let caller_account = Account::empty(caller);
        let mut gas = self.config.call_gas;

        let output = self.engine.call(
            &mut state,
            EngineCall {
                caller: &caller_account,
                callee: &callee_account,
                code: &callee_account.code,
                input,
                value: 0,
            },
            &mut gas,
        )?;
        debug!(
            caller = %caller,
            callee = %callee,
            gas_used = self.config.call_gas.saturating_sub(gas),
            gas_remaining = gas,
            output_len = output.len(),
            "Contract call finished"
        );
        Ok(output)
    }

    #[instrument(skip_all, fields(target = %target))]
    fn read_code<L>(&self, ledger: &mut L, target: Address) -> Result<Vec<u8>, InvocationError>
    where
        L: LedgerStore + ?Sized,
    {
        let code = self.state(ledger).get_code(target)?;
        debug!(target = %target, code_len = code.len(), "Retrieved contract code");
        Ok(code)
    }

    /// Target address of a code request, or `None` when `first` is not the
    /// configured sentinel.
    fn code_target(&self, first: &[u8], second: &[u8]) -> Option<Result<Address, InvocationError>> {
        (first == self.config.get_code_sentinel.as_bytes())
            .then(|| decode_address(second, "target address"))
    }

    fn state<'a, L>(&self, ledger: &'a mut L) -> LedgerStateManager<'a, L>
    where
        L: LedgerStore + ?Sized,
    {
        LedgerStateManager::new(ledger)
            .with_policy(self.config.account_policy)
            .with_codec(self.config.code_encoding)
    }

    fn route(
        &self,
        ledger: &mut dyn LedgerStore,
        creator: &[u8],
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>, InvocationError> {
        let [target, data] = args else {
            return Err(InvocationError::ArgumentCount(args.len()));
        };

        // Code retrieval skips identity resolution entirely.
        if let Some(code_target) = self.code_target(target, data) {
            return self
                .read_code(ledger, code_target?)
                .map(|code| hex::encode(code).into_bytes());
        }

        let caller = self.resolver.resolve(creator)?;
        let transaction = Transaction::decode(target, data)?;
        debug!(kind = transaction.kind(), caller = %caller, "Dispatching invocation");

        match transaction {
            Transaction::Deploy { payload } => self
                .run_deploy(ledger, caller, &payload)
                .map(|address| address.to_hex().into_bytes()),
            Transaction::Call { callee, input } => self.run_call(ledger, caller, callee, &input),
        }
    }
}

impl<E: ExecutionEngine, I: IdentityResolver> InvocationApi for EvmLedgerService<E, I> {
    fn init(&self) -> Response {
        self.traced(|| {
            info!(config = ?self.config, "EVM ledger service initialised");
            Response::success(Vec::new())
        })
    }

    fn invoke(&self, ledger: &mut dyn LedgerStore, creator: &[u8], args: &[Vec<u8>]) -> Response {
        self.traced(|| {
            let span = info_span!("invoke", args = args.len());
            let _enter = span.enter();

            match self.route(ledger, creator, args) {
                Ok(payload) => Response::success(payload),
                Err(e) => {
                    warn!(error = %e, "Invocation failed");
                    Response::error(e.to_string())
                }
            }
        })
    }
}

/// A non-sentinel invocation, decoded once the caller is known.
enum Transaction {
    Deploy { payload: Vec<u8> },
    Call { callee: Address, input: Vec<u8> },
}

impl Transaction {
    fn decode(target: &[u8], data: &[u8]) -> Result<Self, InvocationError> {
        let callee = decode_address(target, "callee address")?;
        if callee.is_zero() {
            let payload = decode_hex(data, "deployment bytecode")?;
            Ok(Self::Deploy { payload })
        } else {
            let input = decode_hex(data, "input")?;
            Ok(Self::Call { callee, input })
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Deploy { .. } => "deploy",
            Self::Call { .. } => "call",
        }
    }
}

impl From<Transaction> for Invocation {
    fn from(transaction: Transaction) -> Self {
        match transaction {
            Transaction::Deploy { payload } => Self::Deploy { payload },
            Transaction::Call { callee, input } => Self::Call { callee, input },
        }
    }
}

fn decode_hex(data: &[u8], what: &'static str) -> Result<Vec<u8>, InvocationError> {
    hex::decode(data).map_err(|e| InvocationError::hex(what, e))
}

fn decode_address(data: &[u8], what: &'static str) -> Result<Address, InvocationError> {
    let bytes = decode_hex(data, what)?;
    Address::from_slice(&bytes).map_err(|e| InvocationError::address(what, e))
}

// =============================================================================
// TESTS
// =============================================================================
