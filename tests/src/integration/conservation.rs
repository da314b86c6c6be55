//! # Conservation Properties
//!
//! Randomized mint/burn/transfer sequences. After every operation,
//! successful or not, the balances must sum to the total supply, stay
//! aligned to the granularity, and a failed operation must leave every
//! balance untouched.

#[cfg(test)]
mod tests {
    use crate::integration::{addr, setup};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tessera_ledger::prelude::*;

    const ACCOUNTS: [u8; 5] = [1, 2, 3, 4, 5];
    const ROUNDS: usize = 500;

    fn balances(ledger: &TokenService) -> Vec<U256> {
        ACCOUNTS
            .iter()
            .map(|n| ledger.balance_of(addr(*n)))
            .collect()
    }

    fn random_account(rng: &mut StdRng) -> Address {
        addr(ACCOUNTS[rng.gen_range(0..ACCOUNTS.len())])
    }

    /// Mix of aligned and deliberately misaligned amounts.
    fn random_amount(rng: &mut StdRng, granularity: u64) -> U256 {
        let units = rng.gen_range(0..200u64);
        if rng.gen_bool(0.8) {
            U256::from(units * granularity)
        } else {
            U256::from(units * granularity + granularity / 2 + 1)
        }
    }

    fn run_sequence(granularity: u64, legacy: bool, seed: u64) {
        let (mut ledger, _, owner) = setup(granularity, legacy);
        let mut rng = StdRng::seed_from_u64(seed);

        ledger
            .mint(owner, addr(1), U256::from(granularity * 1000), vec![])
            .unwrap();

        for round in 0..ROUNDS {
            let before = balances(&ledger);
            let supply_before = ledger.total_supply();
            let amount = random_amount(&mut rng, granularity);
            let from = random_account(&mut rng);
            let to = random_account(&mut rng);

            let result = match rng.gen_range(0..5) {
                0 => ledger.mint(owner, to, amount, vec![]),
                1 => ledger.burn(owner, from, amount, vec![], vec![]),
                2 => ledger.send(from, to, amount, vec![]),
                3 if legacy => ledger.legacy_transfer(from, to, amount),
                3 => ledger.send(from, to, amount, vec![]),
                _ => {
                    // Operator path through a freshly granted third party.
                    let operator = addr(77);
                    if from != operator {
                        ledger.authorize_operator(from, operator).unwrap();
                    }
                    ledger.operator_send(operator, from, to, amount, vec![], vec![])
                }
            };

            assert!(
                ledger.check_invariants().is_valid(),
                "invariants broken at round {round}"
            );

            if result.is_err() {
                assert_eq!(
                    balances(&ledger),
                    before,
                    "failed operation mutated balances at round {round}"
                );
                assert_eq!(ledger.total_supply(), supply_before);
            }

            // Self-transfers aside, value only moves, never appears.
            let total: U256 = balances(&ledger)
                .iter()
                .fold(U256::zero(), |acc, b| acc + *b);
            assert!(total <= ledger.total_supply());
        }
    }

    #[test]
    fn test_random_sequences_unit_granularity() {
        run_sequence(1, false, 7);
    }

    #[test]
    fn test_random_sequences_coarse_granularity() {
        run_sequence(10, false, 11);
    }

    #[test]
    fn test_random_sequences_with_legacy_enabled() {
        run_sequence(5, true, 13);
    }
}
