use parking_lot::Mutex;
use rowbind_core::{
    async_trait,
    driver::{
        BufferedCursor, Command, CommandState, Connection, Cursor, Driver, IsolationLevel,
        Transaction,
    },
    stmt::{CommandType, Parameter},
    Result, Table,
};
use std::{collections::VecDeque, sync::Arc};

/// Something the stub was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Connect,
    Open,
    Close,
    Begin(IsolationLevel),
    Commit,
    Rollback,
    Execute {
        command_type: CommandType,
        text: String,
        parameters: Vec<Parameter>,
        in_transaction: bool,
    },
}

/// Failure injection.
#[derive(Debug, Default, Clone)]
pub struct Behavior {
    pub fail_rollback: bool,
    pub fail_close: bool,

    /// Commands report themselves as async and never complete
    pub hang: bool,
}

/// A driver that records every call and returns queued result sets.
///
/// Clones share their log, queue and behavior, so a test keeps one clone
/// and hands the other to `Db`.
#[derive(Debug, Default, Clone)]
pub struct Stub {
    log: Arc<Mutex<Vec<Event>>>,
    results: Arc<Mutex<VecDeque<Vec<Table>>>>,
    behavior: Arc<Mutex<Behavior>>,
}

impl Stub {
    pub fn events(&self) -> Vec<Event> {
        self.log.lock().clone()
    }

    /// Number of recorded events matching `f`.
    pub fn count(&self, f: impl Fn(&Event) -> bool) -> usize {
        self.log.lock().iter().filter(|event| f(event)).count()
    }

    /// The most recent `Execute` event.
    pub fn last_execute(&self) -> Option<Event> {
        self.log
            .lock()
            .iter()
            .rev()
            .find(|event| matches!(event, Event::Execute { .. }))
            .cloned()
    }

    /// Queues the result sets returned by the next reader.
    pub fn push_result(&self, result_sets: impl IntoIterator<Item = Table>) {
        self.results
            .lock()
            .push_back(result_sets.into_iter().collect());
    }

    pub fn behave(&self, f: impl FnOnce(&mut Behavior)) {
        f(&mut self.behavior.lock());
    }

    fn record(&self, event: Event) {
        self.log.lock().push(event);
    }
}

impl Driver for Stub {
    fn connect(&self) -> Result<Box<dyn Connection>> {
        self.record(Event::Connect);
        Ok(Box::new(StubConnection {
            stub: self.clone(),
            open: false,
        }))
    }
}

#[derive(Debug)]
struct StubConnection {
    stub: Stub,
    open: bool,
}

impl Connection for StubConnection {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self) -> Result<()> {
        self.stub.record(Event::Open);
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.stub.record(Event::Close);
        self.open = false;

        if self.stub.behavior.lock().fail_close {
            return Err(rowbind_core::err!("stub close failure"));
        }
        Ok(())
    }

    fn create_command(&mut self) -> Result<Box<dyn Command>> {
        Ok(Box::new(StubCommand {
            stub: self.stub.clone(),
            state: CommandState::default(),
            in_transaction: false,
        }))
    }

    fn begin_transaction(&mut self, isolation: IsolationLevel) -> Result<Box<dyn Transaction>> {
        self.stub.record(Event::Begin(isolation));
        Ok(Box::new(StubTransaction {
            stub: self.stub.clone(),
            isolation,
        }))
    }
}

#[derive(Debug)]
struct StubTransaction {
    stub: Stub,
    isolation: IsolationLevel,
}

impl Transaction for StubTransaction {
    fn isolation_level(&self) -> IsolationLevel {
        self.isolation
    }

    fn commit(self: Box<Self>) -> Result<()> {
        self.stub.record(Event::Commit);
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<()> {
        self.stub.record(Event::Rollback);

        if self.stub.behavior.lock().fail_rollback {
            return Err(rowbind_core::err!("stub rollback failure"));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct StubCommand {
    stub: Stub,
    state: CommandState,
    in_transaction: bool,
}

impl StubCommand {
    fn execute(&self) -> Box<dyn Cursor> {
        self.stub.record(Event::Execute {
            command_type: self.state.command_type,
            text: self.state.text.clone(),
            parameters: self.state.parameters.clone(),
            in_transaction: self.in_transaction,
        });

        let result_sets = self.stub.results.lock().pop_front().unwrap_or_default();
        Box::new(BufferedCursor::new(result_sets))
    }

    async fn hang(&self) -> Result<()> {
        let hang = self.stub.behavior.lock().hang;
        if hang {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

#[async_trait]
impl Command for StubCommand {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn set_transaction(&mut self, transaction: Option<&dyn Transaction>) {
        self.in_transaction = transaction.is_some();
    }

    fn has_transaction(&self) -> bool {
        self.in_transaction
    }

    fn execute_reader(&mut self) -> Result<Box<dyn Cursor>> {
        Ok(self.execute())
    }

    fn execute_non_query(&mut self) -> Result<u64> {
        self.execute();
        Ok(1)
    }

    fn is_async(&self) -> bool {
        self.stub.behavior.lock().hang
    }

    async fn execute_reader_async(&mut self) -> Result<Box<dyn Cursor>> {
        self.hang().await?;
        Ok(self.execute())
    }

    async fn execute_non_query_async(&mut self) -> Result<u64> {
        self.hang().await?;
        self.execute();
        Ok(1)
    }

    async fn execute_scalar_async(&mut self) -> Result<rowbind_core::stmt::Value> {
        self.hang().await?;
        self.execute_scalar()
    }
}
