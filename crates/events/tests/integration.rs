//! Integration tests for events

#[cfg(test)]
mod tests {
    use pkgv_errors::{ManifestError, UserFacingError};
    use pkgv_events::*;

    struct Tagged {
        tx: EventSender,
    }

    impl EventEmitter for Tagged {
        fn event_sender(&self) -> Option<&EventSender> {
            Some(&self.tx)
        }

        fn correlation_id(&self) -> Option<&str> {
            Some("op-1")
        }
    }

    #[tokio::test]
    async fn test_emitter_helpers() {
        let (tx, mut rx) = channel();

        tx.emit_error("test error");
        tx.emit_debug("test debug");

        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first.event,
            AppEvent::General(GeneralEvent::Error { .. })
        ));
        assert_eq!(first.meta.level, EventLevel::Error);
        assert_eq!(first.meta.source, EventSource::General);

        let second = rx.recv().await.unwrap();
        assert!(matches!(
            second.event,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
        assert_eq!(second.meta.level, EventLevel::Debug);
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning("ignored");
    }

    #[test]
    fn test_no_sender_is_silent() {
        let none: Option<EventSender> = None;
        none.emit_warning("nobody listens");
    }

    #[tokio::test]
    async fn test_correlation_id_stamped() {
        let (tx, mut rx) = channel();
        let emitter = Tagged { tx };
        emitter.emit(AppEvent::Guard(GuardEvent::DiscrepancyReported {
            operation_id: "op-1".to_string(),
            discrepancy: GuardDiscrepancy {
                kind: DiscrepancyKind::Missing,
                path: "/usr/bin/tool".to_string(),
                sigil: "---------".to_string(),
                message: None,
            },
        }));

        let message = rx.recv().await.unwrap();
        assert_eq!(message.meta.correlation_id.as_deref(), Some("op-1"));
        assert_eq!(message.meta.source, EventSource::Guard);
    }

    #[test]
    fn test_guard_event_serialization() {
        let event = AppEvent::Guard(GuardEvent::VerificationCompleted {
            operation_id: "op".to_string(),
            scope: GuardScope::Package {
                name: "bash".to_string(),
                version: "5.2.037-1".to_string(),
            },
            summary: GuardSummary {
                total: 3,
                passed: 2,
                failed: 1,
                missing: 0,
            },
            duration_ms: 12,
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "guard");
        assert_eq!(json["event"]["type"], "verification_completed");
        assert_eq!(json["event"]["scope"]["kind"], "package");
        assert_eq!(json["event"]["summary"]["failed"], 1);
        assert_eq!(event.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_failure_context_from_error() {
        let err = ManifestError::UnknownType {
            line: 3,
            value: "door".to_string(),
        };
        let failure = FailureContext::from_error(&err);
        assert_eq!(failure.message, err.user_message());
        assert_eq!(failure.code.as_deref(), err.user_code());
        assert!(!failure.retryable);
    }
}
