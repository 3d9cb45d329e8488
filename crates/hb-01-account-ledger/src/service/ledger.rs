use super::AccountLedgerService;
use crate::domain::errors::LedgerError;
use crate::domain::rules;
use crate::domain::value_objects::{KeyPrefix, SettlementReport};
use crate::ports::inbound::AccountLedgerApi;
use crate::ports::outbound::{AccountCodec, BatchOperation, KeyValueStore};
use crate::settlement::SETTLEMENT_BATCH_SIZE;
use async_trait::async_trait;
use shared_types::{Account, AccountId, Amount, NewAccount};
use tracing::{debug, info};

#[async_trait]
impl<KV, C> AccountLedgerApi for AccountLedgerService<KV, C>
where
    KV: KeyValueStore,
    C: AccountCodec,
{
    async fn status(&self, id: &AccountId) -> Result<Account, LedgerError> {
        self.load_existing(id)
    }

    async fn add(&self, id: &AccountId, value: Amount) -> Result<Account, LedgerError> {
        let _row = self.rows.lock(id).await;

        let account = self.load_existing(id)?;
        let updated = rules::apply_credit(account, value)?;
        self.save(&updated)?;

        debug!(account = %id, value, balance = updated.balance, "credited");
        Ok(updated)
    }

    async fn subtract(&self, id: &AccountId, value: Amount) -> Result<Account, LedgerError> {
        let _row = self.rows.lock(id).await;

        let account = self.load_existing(id)?;
        let updated = rules::apply_reserve(account, value)?;
        self.save(&updated)?;

        debug!(account = %id, value, hold = updated.hold, "reserved");
        Ok(updated)
    }

    async fn settle_holds(&self) -> Result<SettlementReport, LedgerError> {
        let mut report = SettlementReport::default();
        let ids = self.account_ids()?;

        // Ids arrive in key order, so overlapping passes take row locks in
        // the same order. Each chunk is committed as one batch.
        for chunk in ids.chunks(SETTLEMENT_BATCH_SIZE) {
            let mut held_rows = Vec::new();
            let mut batch = Vec::new();
            let mut chunk_total: Amount = 0;

            for id in chunk {
                let row = self.rows.lock(id).await;

                // Re-read under the lock; the scanned copy may be stale.
                let Some(mut account) = self.load(id)? else {
                    continue;
                };
                report.scanned += 1;
                if account.hold == 0 {
                    continue;
                }

                let settled = rules::apply_settlement(&mut account);
                chunk_total = chunk_total.saturating_add(settled);
                batch.push(BatchOperation::put(
                    KeyPrefix::account_key(&account.id),
                    self.codec.encode(&account)?,
                ));
                held_rows.push(row);
            }

            if batch.is_empty() {
                continue;
            }

            let settled = batch.len();
            self.store.write().atomic_batch_write(batch)?;
            drop(held_rows);

            debug!(accounts = settled, total = chunk_total, "settlement batch committed");
            report.settled += settled;
            report.total_settled = report.total_settled.saturating_add(chunk_total);
        }

        info!(
            scanned = report.scanned,
            settled = report.settled,
            total = report.total_settled,
            "hold settlement complete"
        );
        Ok(report)
    }

    async fn open_account(&self, account: NewAccount) -> Result<Account, LedgerError> {
        rules::validate_new_account(&account)?;
        let _row = self.rows.lock(&account.id).await;

        if self
            .store
            .read()
            .exists(&KeyPrefix::account_key(&account.id))?
        {
            return Err(LedgerError::AccountExists { id: account.id });
        }

        let account = account.into_account();
        self.save(&account)?;

        info!(account = %account.id, balance = account.balance, "account opened");
        Ok(account)
    }

    async fn account_count(&self) -> Result<usize, LedgerError> {
        Ok(self
            .store
            .read()
            .count_prefix(KeyPrefix::Account.as_bytes())?)
    }
}
