//! Wallet Connector
//!
//! Provider-agnostic connection logic. [`WalletConnector`] talks to anything
//! implementing [`EthereumProvider`]; in the browser that is
//! [`InjectedProvider`](super::ethereum::InjectedProvider), in tests an
//! in-memory double.

use std::rc::Rc;

use async_trait::async_trait;
use shared::{Address, ProviderError, RequestArguments, RpcMethod};

/// Callback invoked with the provider's new account list
pub type AccountsHandler = Box<dyn Fn(Vec<String>)>;

// ============================================================================
// PROVIDER SEAM
// ============================================================================

/// An EIP-1193 style wallet provider.
///
/// Browser providers are single-threaded, so futures are not `Send`.
#[async_trait(?Send)]
pub trait EthereumProvider {
    /// Handle returned when registering a listener, needed to remove it again
    type Listener;

    /// Send a JSON-RPC request, returning the raw result
    async fn request(&self, args: RequestArguments) -> Result<serde_json::Value, ProviderError>;

    /// Register a handler for `accountsChanged`
    fn on_accounts_changed(&self, handler: AccountsHandler) -> Self::Listener;

    /// Remove a handler registered with [`EthereumProvider::on_accounts_changed`]
    fn remove_accounts_listener(&self, listener: Self::Listener);
}

// ============================================================================
// CONNECTOR
// ============================================================================

/// Connects to a wallet provider, if one is present.
pub struct WalletConnector<P> {
    provider: Option<Rc<P>>,
}

impl<P: EthereumProvider> WalletConnector<P> {
    pub fn new(provider: Option<P>) -> Self {
        Self {
            provider: provider.map(Rc::new),
        }
    }

    fn provider(&self) -> Result<&Rc<P>, ProviderError> {
        self.provider.as_ref().ok_or(ProviderError::ProviderUnavailable)
    }

    pub fn check_provider_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Prompt the user to authorize an account and return the first one.
    pub async fn request_account(&self) -> Result<Address, ProviderError> {
        let accounts = self.accounts(RpcMethod::RequestAccounts).await?;
        let first = accounts.into_iter().next().ok_or_else(|| {
            ProviderError::RequestFailed("provider authorized no accounts".to_string())
        })?;

        Ok(first.parse::<Address>()?)
    }

    /// Read already-authorized accounts without prompting.
    pub async fn get_current_account(&self) -> Result<Option<Address>, ProviderError> {
        let accounts = self.accounts(RpcMethod::Accounts).await?;

        match accounts.into_iter().next() {
            Some(first) => Ok(Some(first.parse::<Address>()?)),
            None => Ok(None),
        }
    }

    /// Call `callback` whenever the active account changes, until the returned
    /// subscription is dropped.
    ///
    /// An empty account list (access revoked) is delivered as `None`. Events whose
    /// first account is not a valid address are logged and skipped.
    pub fn subscribe_to_account_changes<F>(
        &self,
        callback: F,
    ) -> Result<AccountsSubscription<P>, ProviderError>
    where
        F: Fn(Option<Address>) + 'static,
    {
        let provider = Rc::clone(self.provider()?);

        let listener = provider.on_accounts_changed(Box::new(move |accounts: Vec<String>| {
            match accounts.first().map(|first| first.parse::<Address>()) {
                Some(Ok(address)) => callback(Some(address)),
                Some(Err(e)) => log::warn!("Ignoring accountsChanged with bad address: {}", e),
                None => callback(None),
            }
        }));

        Ok(AccountsSubscription {
            provider,
            listener: Some(listener),
        })
    }

    async fn accounts(&self, method: RpcMethod) -> Result<Vec<String>, ProviderError> {
        let provider = self.provider()?;
        log::debug!("Provider request: {}", method);

        let result = provider.request(RequestArguments::new(method)).await?;
        Ok(serde_json::from_value(result)?)
    }
}

// ============================================================================
// SUBSCRIPTION
// ============================================================================

/// Registered `accountsChanged` listener. Dropping it removes the listener.
pub struct AccountsSubscription<P: EthereumProvider> {
    provider: Rc<P>,
    listener: Option<P::Listener>,
}

impl<P: EthereumProvider> AccountsSubscription<P> {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.provider.remove_accounts_listener(listener);
            log::debug!("accountsChanged listener removed");
        }
    }
}

impl<P: EthereumProvider> Drop for AccountsSubscription<P> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use shared::WalletState;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    const ALICE: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";
    const BOB: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

    /// In-memory provider with scripted replies
    #[derive(Default)]
    struct MockProvider {
        replies: RefCell<VecDeque<Result<serde_json::Value, ProviderError>>>,
        requests: RefCell<Vec<RpcMethod>>,
        listeners: RefCell<Vec<(u32, AccountsHandler)>>,
        next_id: Cell<u32>,
    }

    impl MockProvider {
        fn replying(replies: Vec<Result<serde_json::Value, ProviderError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                ..Default::default()
            }
        }

        fn emit(&self, accounts: &[&str]) {
            let accounts: Vec<String> = accounts.iter().map(|s| s.to_string()).collect();
            for (_, handler) in self.listeners.borrow().iter() {
                handler(accounts.clone());
            }
        }

        fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl EthereumProvider for MockProvider {
        type Listener = u32;

        async fn request(&self, args: RequestArguments) -> Result<serde_json::Value, ProviderError> {
            self.requests.borrow_mut().push(args.method);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::RequestFailed("no reply scripted".into())))
        }

        fn on_accounts_changed(&self, handler: AccountsHandler) -> u32 {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.listeners.borrow_mut().push((id, handler));
            id
        }

        fn remove_accounts_listener(&self, listener: u32) {
            self.listeners.borrow_mut().retain(|(id, _)| *id != listener);
        }
    }

    fn connector(replies: Vec<Result<serde_json::Value, ProviderError>>) -> WalletConnector<MockProvider> {
        WalletConnector::new(Some(MockProvider::replying(replies)))
    }

    fn mock(connector: &WalletConnector<MockProvider>) -> &MockProvider {
        connector.provider.as_deref().unwrap()
    }

    #[test]
    fn test_provider_availability() {
        assert!(connector(vec![]).check_provider_available());
        assert!(!WalletConnector::<MockProvider>::new(None).check_provider_available());
    }

    #[test]
    fn test_current_account_returns_first_entry() {
        let connector = connector(vec![Ok(serde_json::json!([ALICE, BOB]))]);
        let account = block_on(connector.get_current_account()).unwrap();

        assert_eq!(account, Some(ALICE.parse().unwrap()));
        assert_eq!(*mock(&connector).requests.borrow(), vec![RpcMethod::Accounts]);
    }

    #[test]
    fn test_current_account_empty_list() {
        let connector = connector(vec![Ok(serde_json::json!([]))]);
        assert_eq!(block_on(connector.get_current_account()), Ok(None));
    }

    #[test]
    fn test_request_account_uses_permission_prompt() {
        let connector = connector(vec![Ok(serde_json::json!([BOB]))]);
        let account = block_on(connector.request_account()).unwrap();

        assert_eq!(account.as_str(), BOB);
        assert_eq!(*mock(&connector).requests.borrow(), vec![RpcMethod::RequestAccounts]);
    }

    #[test]
    fn test_request_account_without_provider() {
        let connector = WalletConnector::<MockProvider>::new(None);
        let mut state = WalletState::default();

        let result = block_on(connector.request_account());
        assert_eq!(result, Err(ProviderError::ProviderUnavailable));

        state.apply_connect(result);
        assert_eq!(state.address(), None);
    }

    #[test]
    fn test_request_account_rejected() {
        let connector = connector(vec![Err(ProviderError::UserRejected)]);
        assert_eq!(block_on(connector.request_account()), Err(ProviderError::UserRejected));
    }

    #[test]
    fn test_request_account_bad_replies() {
        let connector = connector(vec![
            Ok(serde_json::json!([])),
            Ok(serde_json::json!(["not-an-address"])),
            Ok(serde_json::json!({ "accounts": [] })),
        ]);

        for _ in 0..3 {
            assert!(matches!(
                block_on(connector.request_account()),
                Err(ProviderError::RequestFailed(_))
            ));
        }
    }

    #[test]
    fn test_account_change_updates_state() {
        let connector = connector(vec![]);
        let state = Rc::new(RefCell::new(WalletState::default()));

        let sink = Rc::clone(&state);
        let _subscription = connector
            .subscribe_to_account_changes(move |address| sink.borrow_mut().apply_accounts_changed(address))
            .unwrap();

        mock(&connector).emit(&[ALICE]);
        assert_eq!(state.borrow().address().map(Address::as_str), Some(ALICE));

        mock(&connector).emit(&[BOB, ALICE]);
        assert_eq!(state.borrow().address().map(Address::as_str), Some(BOB));

        mock(&connector).emit(&["garbage"]);
        assert_eq!(state.borrow().address().map(Address::as_str), Some(BOB));

        mock(&connector).emit(&[]);
        assert!(!state.borrow().is_connected());
    }

    #[test]
    fn test_dropping_subscription_removes_listener() {
        let connector = connector(vec![]);
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let subscription = connector
            .subscribe_to_account_changes(move |_| counter.set(counter.get() + 1))
            .unwrap();
        assert_eq!(mock(&connector).listener_count(), 1);

        mock(&connector).emit(&[ALICE]);
        drop(subscription);
        mock(&connector).emit(&[BOB]);

        assert_eq!(calls.get(), 1);
        assert_eq!(mock(&connector).listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_only_removes_own_listener() {
        let connector = connector(vec![]);
        let first = connector.subscribe_to_account_changes(|_| {}).unwrap();
        let _second = connector.subscribe_to_account_changes(|_| {}).unwrap();

        first.unsubscribe();
        assert_eq!(mock(&connector).listener_count(), 1);
    }

    #[test]
    fn test_subscribe_without_provider() {
        let connector = WalletConnector::<MockProvider>::new(None);
        assert!(matches!(
            connector.subscribe_to_account_changes(|_| {}),
            Err(ProviderError::ProviderUnavailable)
        ));
    }
}
