use crate::error::TableError;
use crate::records::HandRecord;
use cardroom_core::*;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Identity marker for account holders. Rooms only ever see `ID<Member>`;
/// who that is and how they authenticated is the caller's business.
#[derive(Debug, Clone, Copy)]
pub struct Member;

/// Chip custody outside the table.
///
/// The room debits a member's balance when they buy in and credits it
/// when they stand up. Implementations own atomicity; the room only
/// promises to call debit before seating and credit after unseating.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Withdraws chips from a member's balance, or refuses with
    /// [`TableError::InsufficientBalance`].
    async fn debit(&self, member: ID<Member>, chips: Chips) -> Result<(), TableError>;
    /// Returns chips to a member's balance.
    async fn credit(&self, member: ID<Member>, chips: Chips);
}

/// Hand history sink. Called once per finished hand, after settlement.
#[async_trait::async_trait]
pub trait Archive: Send + Sync {
    async fn record(&self, hand: HandRecord);
}

/// In-memory [`Ledger`] keyed by member.
#[derive(Default)]
pub struct Bankroll {
    balances: Mutex<HashMap<ID<Member>, Chips>>,
}

impl Bankroll {
    pub async fn deposit(&self, member: ID<Member>, chips: Chips) {
        *self.balances.lock().await.entry(member).or_insert(0) += chips;
    }
    pub async fn balance(&self, member: ID<Member>) -> Chips {
        self.balances
            .lock()
            .await
            .get(&member)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl Ledger for Bankroll {
    async fn debit(&self, member: ID<Member>, chips: Chips) -> Result<(), TableError> {
        let mut balances = self.balances.lock().await;
        match balances.get_mut(&member) {
            Some(balance) if *balance >= chips => {
                *balance -= chips;
                Ok(())
            }
            _ => Err(TableError::InsufficientBalance),
        }
    }
    async fn credit(&self, member: ID<Member>, chips: Chips) {
        *self.balances.lock().await.entry(member).or_insert(0) += chips;
    }
}

/// In-memory [`Archive`] that keeps every record it is handed.
#[derive(Default)]
pub struct Journal {
    hands: Mutex<Vec<HandRecord>>,
}

impl Journal {
    pub async fn hands(&self) -> Vec<HandRecord> {
        self.hands.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl Archive for Journal {
    async fn record(&self, hand: HandRecord) {
        log::info!("[journal] recorded hand {} in {}", hand.number, hand.room);
        self.hands.lock().await.push(hand);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[tokio::test]
    async fn debit_refuses_overdraft() {
        let bank = Bankroll::default();
        let member = ID::default();
        bank.deposit(member, 100).await;
        assert!(bank.debit(member, 150).await.is_err());
        assert_eq!(bank.balance(member).await, 100);
        assert!(bank.debit(member, 100).await.is_ok());
        assert_eq!(bank.balance(member).await, 0);
    }
    #[tokio::test]
    async fn credit_round_trips() {
        let bank = Bankroll::default();
        let member = ID::default();
        bank.deposit(member, 500).await;
        bank.debit(member, 200).await.unwrap();
        bank.credit(member, 350).await;
        assert_eq!(bank.balance(member).await, 650);
    }
}
