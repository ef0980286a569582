//! # Injected Tracing
//!
//! The router logs only through the dispatch it was built with. Nothing is
//! installed globally.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ledger_evm::prelude::*;
    use ledger_evm_telemetry::{build_dispatch_with_writer, noop_dispatch, TelemetryConfig};
    use std::io;
    use std::sync::{Arc, Mutex};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn dispatch_into(buffer: &LogBuffer, config: &TelemetryConfig) -> tracing::Dispatch {
        let sink = buffer.clone();
        build_dispatch_with_writer(config, move || sink.clone()).unwrap()
    }

    fn harness_logging_to(dispatch: tracing::Dispatch) -> Harness {
        let mut h = Harness::new();
        h.service = EvmLedgerService::with_x509(SimpleStorageEngine::new(), RouterConfig::default())
            .with_dispatch(dispatch);
        h
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[test]
    fn test_deploy_is_logged_through_injected_dispatch() {
        let buffer = LogBuffer::default();
        let config = TelemetryConfig {
            log_level: "debug".to_string(),
            ..TelemetryConfig::default()
        };
        let mut h = harness_logging_to(dispatch_into(&buffer, &config));

        let address = h.deploy_simple_storage(&creator(EC_CERT));

        let logs = buffer.contents();
        assert!(logs.contains("Contract deployed"));
        assert!(logs.contains(&address));
        assert!(logs.contains("gas_remaining"));
        assert!(logs.contains("Allocated deployment sequence"));
    }

    #[test]
    fn test_failure_is_logged_as_warning() {
        let buffer = LogBuffer::default();
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            ..TelemetryConfig::default()
        };
        let mut h = harness_logging_to(dispatch_into(&buffer, &config));

        h.deploy(&creator(RSA_CERT), DEPLOY_BYTECODE);

        let logs = buffer.contents();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Invocation failed"));
        assert!(logs.contains("public key type is not yet supported"));
    }

    #[test]
    fn test_json_logs() {
        let buffer = LogBuffer::default();
        let config = TelemetryConfig {
            json_logs: true,
            ..TelemetryConfig::default()
        };
        let mut h = harness_logging_to(dispatch_into(&buffer, &config));

        h.deploy_simple_storage(&creator(EC_CERT));

        let line = buffer
            .contents()
            .lines()
            .find(|line| line.contains("Contract deployed"))
            .map(str::to_string)
            .unwrap();
        assert!(line.contains(r#""contract":"197C54CBC892A899BB88D1C8DC5CCDA997C36B73""#));
    }

    #[test]
    fn test_services_do_not_share_dispatch() {
        let buffer = LogBuffer::default();
        let mut logged = harness_logging_to(dispatch_into(&buffer, &TelemetryConfig::default()));
        let mut silent = harness_logging_to(noop_dispatch());

        silent.deploy_simple_storage(&creator(EC_CERT));
        assert!(buffer.contents().is_empty());

        logged.deploy_simple_storage(&creator(EC_CERT));
        assert!(!buffer.contents().is_empty());
    }

    #[test]
    fn test_direct_deploy_uses_injected_dispatch() {
        let buffer = LogBuffer::default();
        let config = TelemetryConfig {
            log_level: "debug".to_string(),
            ..TelemetryConfig::default()
        };
        let mut h = harness_logging_to(dispatch_into(&buffer, &config));
        let caller = Address::from_hex(EC_CERT_ADDRESS).unwrap();
        let payload = hex::decode(DEPLOY_BYTECODE).unwrap();

        let address = h.service.deploy(&mut h.ledger, caller, &payload).unwrap();
        let code = h.service.get_code(&mut h.ledger, address).unwrap();
        assert_eq!(code, runtime_bytecode());

        let logs = buffer.contents();
        assert!(logs.contains("Contract deployed"));
        assert!(logs.contains("run_deploy"));
        assert!(logs.contains("Retrieved contract code"));
    }

    #[test]
    fn test_direct_call_without_dispatch_is_silent() {
        let buffer = LogBuffer::default();
        let mut logged = harness_logging_to(dispatch_into(&buffer, &TelemetryConfig::default()));
        let address = logged.deploy_simple_storage(&creator(EC_CERT));
        let address = Address::from_hex(&address).unwrap();
        let caller = Address::from_hex(EC_CERT_ADDRESS).unwrap();

        let silent = harness_logging_to(noop_dispatch());
        let buffered = buffer.contents().len();
        tracing::dispatcher::with_default(&dispatch_into(&buffer, &TelemetryConfig::default()), || {
            silent
                .service
                .call(&mut logged.ledger, caller, address, &hex::decode(set_input(7)).unwrap())
                .unwrap();
        });
        assert_eq!(buffer.contents().len(), buffered);
    }

    #[test]
    fn test_init_logs_configuration() {
        let buffer = LogBuffer::default();
        let h = harness_logging_to(dispatch_into(&buffer, &TelemetryConfig::default()));

        assert!(h.service.init().is_ok());
        assert!(buffer.contents().contains("EVM ledger service initialised"));
    }
}
