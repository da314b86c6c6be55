//! # Re-entrancy Scenarios
//!
//! Recipient hooks that call back into the ledger mid-transfer. The
//! mutate-then-notify ordering means every re-entrant call observes the
//! committed post-transfer book, and a failing outer call unwinds its
//! committed inner calls too.

#[cfg(test)]
mod tests {
    use crate::integration::{addr, setup};
    use std::sync::{Arc, Mutex};
    use tessera_ledger::prelude::*;

    /// Records the recipient balance visible while the hook runs.
    struct BalanceProbe {
        observed: Mutex<Option<U256>>,
    }

    impl BalanceProbe {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                observed: Mutex::new(None),
            })
        }
    }

    impl TokensRecipient for BalanceProbe {
        fn on_tokens_received(
            &self,
            ledger: &mut dyn TokenApi,
            notice: &TransferNotice,
        ) -> Result<(), RecipientError> {
            *self.observed.lock().unwrap() = Some(ledger.balance_of(notice.to));
            Ok(())
        }
    }

    /// Forwards a fixed amount onward from the receiving account.
    struct Forwarder {
        target: Address,
        amount: U256,
    }

    impl TokensRecipient for Forwarder {
        fn on_tokens_received(
            &self,
            ledger: &mut dyn TokenApi,
            notice: &TransferNotice,
        ) -> Result<(), RecipientError> {
            ledger
                .send(notice.to, self.target, self.amount, vec![])
                .map_err(|err| RecipientError::new(err.to_string()))
        }
    }

    /// Performs a successful re-entrant send, then rejects the transfer.
    struct RejectAfterReentry {
        target: Address,
        amount: U256,
    }

    impl TokensRecipient for RejectAfterReentry {
        fn on_tokens_received(
            &self,
            ledger: &mut dyn TokenApi,
            notice: &TransferNotice,
        ) -> Result<(), RecipientError> {
            ledger
                .send(notice.to, self.target, self.amount, vec![])
                .map_err(|err| RecipientError::new(err.to_string()))?;
            Err(RecipientError::new("changed my mind"))
        }
    }

    /// Re-enters the legacy delegated path trying to reuse the same budget.
    struct AllowanceRaider {
        spender: Address,
        from: Address,
        target: Address,
        amount: U256,
        inner_result: Mutex<Option<LedgerResult<()>>>,
    }

    impl TokensRecipient for AllowanceRaider {
        fn on_tokens_received(
            &self,
            ledger: &mut dyn TokenApi,
            _notice: &TransferNotice,
        ) -> Result<(), RecipientError> {
            let result =
                ledger.legacy_transfer_from(self.spender, self.from, self.target, self.amount);
            *self.inner_result.lock().unwrap() = Some(result);
            Ok(())
        }
    }

    #[test]
    fn test_hook_observes_post_transfer_balance() {
        let (mut ledger, registry, owner) = setup(1, false);
        let alice = addr(1);
        let bob = addr(2);

        let probe = BalanceProbe::new();
        registry.register_hook(bob, capabilities::TOKENS_RECIPIENT, probe.clone());

        ledger.mint(owner, alice, U256::from(1000), vec![]).unwrap();
        ledger.send(alice, bob, U256::from(300), vec![]).unwrap();

        // The book was credited before the hook ran.
        assert_eq!(*probe.observed.lock().unwrap(), Some(U256::from(300)));
    }

    #[test]
    fn test_mint_notification_observes_post_mint_state() {
        let (mut ledger, registry, owner) = setup(1, false);
        let bob = addr(2);

        let probe = BalanceProbe::new();
        registry.register_hook(bob, capabilities::TOKENS_RECIPIENT, probe.clone());

        ledger.mint(owner, bob, U256::from(500), vec![]).unwrap();
        assert_eq!(*probe.observed.lock().unwrap(), Some(U256::from(500)));
    }

    #[test]
    fn test_reentrant_forwarding_commits_both_transfers() {
        let (mut ledger, registry, owner) = setup(1, false);
        let alice = addr(1);
        let bob = addr(2);
        let carol = addr(3);

        registry.register_hook(
            bob,
            capabilities::TOKENS_RECIPIENT,
            Arc::new(Forwarder {
                target: carol,
                amount: U256::from(100),
            }),
        );

        ledger.mint(owner, alice, U256::from(1000), vec![]).unwrap();
        ledger.send(alice, bob, U256::from(300), vec![]).unwrap();

        assert_eq!(ledger.balance_of(alice), U256::from(700));
        assert_eq!(ledger.balance_of(bob), U256::from(200));
        assert_eq!(ledger.balance_of(carol), U256::from(100));
        assert_eq!(ledger.total_supply(), U256::from(1000));
        assert!(ledger.check_invariants().is_valid());

        // Inner transfer committed first, so its record precedes the outer one.
        let sent_targets: Vec<Address> = ledger
            .events()
            .iter()
            .filter_map(|event| match event {
                LedgerEvent::Sent(sent) => Some(sent.to),
                _ => None,
            })
            .collect();
        assert_eq!(sent_targets, vec![carol, bob]);
    }

    #[test]
    fn test_reentrant_overdraw_fails_cleanly() {
        let (mut ledger, registry, owner) = setup(1, false);
        let alice = addr(1);
        let bob = addr(2);

        // The forwarder tries to pass on more than bob will hold.
        registry.register_hook(
            bob,
            capabilities::TOKENS_RECIPIENT,
            Arc::new(Forwarder {
                target: addr(3),
                amount: U256::from(400),
            }),
        );

        ledger.mint(owner, alice, U256::from(1000), vec![]).unwrap();
        let err = ledger.send(alice, bob, U256::from(300), vec![]).unwrap_err();
        assert!(matches!(err, LedgerError::RecipientRejected(_)));

        // The whole outer transfer unwound.
        assert_eq!(ledger.balance_of(alice), U256::from(1000));
        assert_eq!(ledger.balance_of(bob), U256::zero());
        assert_eq!(ledger.balance_of(addr(3)), U256::zero());
        assert!(ledger.check_invariants().is_valid());
    }

    #[test]
    fn test_outer_failure_unwinds_committed_inner_transfer() {
        let (mut ledger, registry, owner) = setup(1, false);
        let alice = addr(1);
        let bob = addr(2);
        let carol = addr(3);

        registry.register_hook(
            bob,
            capabilities::TOKENS_RECIPIENT,
            Arc::new(RejectAfterReentry {
                target: carol,
                amount: U256::from(50),
            }),
        );

        ledger.mint(owner, alice, U256::from(1000), vec![]).unwrap();
        let committed_events = ledger.events().len();

        let err = ledger.send(alice, bob, U256::from(300), vec![]).unwrap_err();
        assert_eq!(err, LedgerError::RecipientRejected("changed my mind".into()));

        // The inner send committed, then the outer rollback erased it too.
        assert_eq!(ledger.balance_of(alice), U256::from(1000));
        assert_eq!(ledger.balance_of(bob), U256::zero());
        assert_eq!(ledger.balance_of(carol), U256::zero());
        assert_eq!(ledger.events().len(), committed_events);
        assert!(ledger.check_invariants().is_valid());
    }

    #[test]
    fn test_reentrant_allowance_double_spend_blocked() {
        let (mut ledger, registry, owner) = setup(1, true);
        let alice = addr(1);
        let spender = addr(2);
        let carol = addr(3);
        let dave = addr(4);

        let raider = Arc::new(AllowanceRaider {
            spender,
            from: alice,
            target: dave,
            amount: U256::from(40),
            inner_result: Mutex::new(None),
        });
        registry.register_hook(carol, capabilities::TOKENS_RECIPIENT, raider.clone());

        ledger.mint(owner, alice, U256::from(1000), vec![]).unwrap();
        ledger.approve(alice, spender, U256::from(50)).unwrap();

        // The outer spend reserves 40 of the 50 budget before the hook runs,
        // so the re-entrant attempt sees only 10 remaining.
        ledger
            .legacy_transfer_from(spender, alice, carol, U256::from(40))
            .unwrap();

        let inner = raider.inner_result.lock().unwrap().clone().unwrap();
        assert_eq!(
            inner,
            Err(LedgerError::AllowanceExceeded {
                requested: U256::from(40),
                remaining: U256::from(10),
            })
        );

        assert_eq!(ledger.balance_of(carol), U256::from(40));
        assert_eq!(ledger.balance_of(dave), U256::zero());
        assert_eq!(ledger.allowance(alice, spender), Ok(U256::from(10)));
        assert!(ledger.check_invariants().is_valid());
    }
}
