//! Gold-word currency.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::storage::KeyValueStore;
use crate::combat::Reward;
use crate::core::constants::{CURRENCY_STORAGE_KEY, MAX_TRANSACTION_HISTORY};
use crate::error::{EconomyError, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordTier {
    Simple,
    Medium,
    Complex,
}

impl WordTier {
    fn base_value(&self) -> u32 {
        match self {
            WordTier::Simple => 2,
            WordTier::Medium => 4,
            WordTier::Complex => 7,
        }
    }
}

/// Gold value of reading one word: tier base, half the reading level,
/// half a coin per letter past the third, floored.
pub fn word_value(word: &str, reading_level: u32, tier: WordTier) -> u32 {
    let level_bonus = reading_level / 2;
    let extra_letters = word.chars().count().saturating_sub(3) as f64;
    (tier.base_value() as f64 + level_bonus as f64 + extra_letters * 0.5).floor() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earn,
    Spend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: u32,
    pub source: String,
    /// Unix milliseconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletStatistics {
    pub total_earned: u64,
    pub total_spent: u64,
    pub net_worth: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    gold_words: u32,
    #[serde(default)]
    transaction_history: Vec<Transaction>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> u32 {
        self.gold_words
    }

    /// Adds gold; zero amounts are ignored
    pub fn earn(&mut self, amount: u32, source: &str) {
        if amount == 0 {
            return;
        }
        self.gold_words = self.gold_words.saturating_add(amount);
        self.record(TransactionKind::Earn, amount, source);
        debug!(amount, source, balance = self.gold_words, "gold earned");
    }

    /// Banks an enemy-defeat reward
    pub fn earn_reward(&mut self, reward: &Reward, source: &str) {
        self.earn(reward.gold_words, source);
    }

    pub fn spend(&mut self, amount: u32, source: &str) -> Result<(), EconomyError> {
        if amount == 0 {
            return Ok(());
        }
        if self.gold_words < amount {
            return Err(EconomyError::InsufficientFunds {
                needed: amount,
                available: self.gold_words,
            });
        }
        self.gold_words -= amount;
        self.record(TransactionKind::Spend, amount, source);
        debug!(amount, source, balance = self.gold_words, "gold spent");
        Ok(())
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.gold_words >= amount
    }

    /// Up to `count` transactions, newest first
    pub fn recent_transactions(&self, count: usize) -> Vec<&Transaction> {
        self.transaction_history.iter().rev().take(count).collect()
    }

    /// Totals over the retained history only
    pub fn statistics(&self) -> WalletStatistics {
        let mut stats = WalletStatistics {
            total_earned: 0,
            total_spent: 0,
            net_worth: self.gold_words,
        };
        for t in &self.transaction_history {
            match t.kind {
                TransactionKind::Earn => stats.total_earned += t.amount as u64,
                TransactionKind::Spend => stats.total_spent += t.amount as u64,
            }
        }
        stats
    }

    pub fn reset(&mut self) {
        self.gold_words = 0;
        self.transaction_history.clear();
    }

    fn record(&mut self, kind: TransactionKind, amount: u32, source: &str) {
        self.transaction_history.push(Transaction {
            kind,
            amount,
            source: source.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        });
        if self.transaction_history.len() > MAX_TRANSACTION_HISTORY {
            let excess = self.transaction_history.len() - MAX_TRANSACTION_HISTORY;
            self.transaction_history.drain(..excess);
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(CURRENCY_STORAGE_KEY, &json)
    }

    /// Reads the saved wallet; `None` when nothing was saved yet
    pub fn load(store: &impl KeyValueStore) -> Result<Option<Self>, StorageError> {
        match store.get(CURRENCY_STORAGE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Saved wallet, or an empty one if missing or unreadable
    pub fn load_or_default(store: &impl KeyValueStore) -> Self {
        match Self::load(store) {
            Ok(wallet) => wallet.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "could not load wallet, starting empty");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::storage::MemoryStore;

    #[test]
    fn test_word_value() {
        assert_eq!(word_value("cat", 1, WordTier::Simple), 2);
        // 4 + 2 + 1.5
        assert_eq!(word_value("garden", 5, WordTier::Medium), 7);
        // 7 + 10 + 3
        assert_eq!(word_value("butterfly", 20, WordTier::Complex), 20);
    }

    #[test]
    fn test_earn_and_spend() {
        let mut wallet = Wallet::new();
        wallet.earn(30, "goblin defeat");
        wallet.earn(0, "nothing");
        wallet.spend(12, "apple").unwrap();

        assert_eq!(wallet.balance(), 18);
        assert_eq!(wallet.recent_transactions(10).len(), 2);
        assert_eq!(wallet.recent_transactions(10)[0].kind, TransactionKind::Spend);
    }

    #[test]
    fn test_overspend_is_rejected() {
        let mut wallet = Wallet::new();
        wallet.earn(5, "bat");
        let err = wallet.spend(6, "potion").unwrap_err();
        assert!(matches!(
            err,
            EconomyError::InsufficientFunds {
                needed: 6,
                available: 5
            }
        ));
        assert_eq!(wallet.balance(), 5);
        assert!(wallet.can_afford(5));
        assert!(!wallet.can_afford(6));
    }

    #[test]
    fn test_history_is_capped() {
        let mut wallet = Wallet::new();
        for i in 1..=60 {
            wallet.earn(i, "grind");
        }
        let recent = wallet.recent_transactions(100);
        assert_eq!(recent.len(), 50);
        assert_eq!(recent[0].amount, 60);
        assert_eq!(recent[49].amount, 11);

        let stats = wallet.statistics();
        assert_eq!(stats.total_earned, (11..=60).sum::<u32>() as u64);
        assert_eq!(stats.net_worth, (1..=60).sum::<u32>());
    }

    #[test]
    fn test_save_load_through_store() {
        let mut store = MemoryStore::new();
        assert_eq!(Wallet::load(&store).unwrap(), None);

        let mut wallet = Wallet::new();
        wallet.earn_reward(
            &Reward {
                gold_words: 10,
                experience: 5,
            },
            "slime defeat",
        );
        wallet.save(&mut store).unwrap();

        let loaded = Wallet::load(&store).unwrap().unwrap();
        assert_eq!(loaded, wallet);
    }

    #[test]
    fn test_corrupt_save_falls_back_to_empty() {
        let mut store = MemoryStore::new();
        store.set(CURRENCY_STORAGE_KEY, "not json").unwrap();
        assert!(matches!(
            Wallet::load(&store),
            Err(StorageError::Serialization(_))
        ));
        assert_eq!(Wallet::load_or_default(&store), Wallet::default());
    }

    #[test]
    fn test_reset() {
        let mut wallet = Wallet::new();
        wallet.earn(9, "chest");
        wallet.reset();
        assert_eq!(wallet.balance(), 0);
        assert!(wallet.recent_transactions(5).is_empty());
    }
}
