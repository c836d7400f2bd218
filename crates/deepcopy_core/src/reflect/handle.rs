use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::reflect::{Node, Value};

type FuncBody = dyn Fn(&[Node]) -> Vec<Node> + Send + Sync;

/// Callable function value. Clones share the same function; equality is identity.
#[derive(Clone)]
pub struct FuncHandle(Arc<FuncBody>);

impl FuncHandle {
	/// Wrap a closure.
	pub fn new(body: impl Fn(&[Node]) -> Vec<Node> + Send + Sync + 'static) -> Self {
		Self(Arc::new(body))
	}

	/// Invoke the function.
	pub fn call(&self, args: &[Node]) -> Vec<Node> {
		(self.0)(args)
	}

	/// Whether both handles refer to the same function.
	pub fn same(&self, other: &FuncHandle) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	fn addr(&self) -> usize {
		Arc::as_ptr(&self.0) as *const () as usize
	}
}

impl fmt::Debug for FuncHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "FuncHandle(0x{:x})", self.addr())
	}
}

#[derive(Debug)]
struct ChanState {
	capacity: usize,
	queue: Mutex<VecDeque<Value>>,
}

/// Bounded FIFO channel handle. Clones share the same queue; equality is identity.
#[derive(Clone)]
pub struct ChanHandle(Arc<ChanState>);

impl ChanHandle {
	/// Create a channel buffering up to `capacity` values.
	pub fn new(capacity: usize) -> Self {
		Self(Arc::new(ChanState {
			capacity,
			queue: Mutex::new(VecDeque::with_capacity(capacity)),
		}))
	}

	/// Enqueue a value; hands it back when the buffer is full.
	pub fn try_send(&self, value: Value) -> Result<(), Value> {
		let mut queue = self.0.queue.lock();
		if queue.len() >= self.0.capacity {
			return Err(value);
		}
		queue.push_back(value);
		Ok(())
	}

	/// Dequeue the oldest value, if any.
	pub fn try_recv(&self) -> Option<Value> {
		self.0.queue.lock().pop_front()
	}

	/// Buffered value count.
	pub fn len(&self) -> usize {
		self.0.queue.lock().len()
	}

	/// Whether no values are buffered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Buffer capacity.
	pub fn capacity(&self) -> usize {
		self.0.capacity
	}

	/// Whether both handles refer to the same channel.
	pub fn same(&self, other: &ChanHandle) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	/// Channel address, stable for the lifetime of the allocation.
	pub fn addr(&self) -> usize {
		Arc::as_ptr(&self.0) as usize
	}
}

impl fmt::Debug for ChanHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ChanHandle(0x{:x}, cap={})", self.addr(), self.0.capacity)
	}
}

#[cfg(test)]
mod tests {
	use super::{ChanHandle, FuncHandle};
	use crate::reflect::{Node, TypeId, TypeTable, Value};

	#[test]
	fn channel_clones_share_the_queue() {
		let chan = ChanHandle::new(2);
		let alias = chan.clone();
		chan.try_send(Value::I64(1)).expect("buffer has room");
		alias.try_send(Value::I64(2)).expect("buffer has room");
		assert!(chan.try_send(Value::I64(3)).is_err(), "buffer should be full");

		assert!(chan.same(&alias));
		assert!(matches!(alias.try_recv(), Some(Value::I64(1))));
		assert!(matches!(chan.try_recv(), Some(Value::I64(2))));
		assert!(chan.is_empty());
	}

	#[test]
	fn func_handle_invokes_body() {
		let types = TypeTable::new();
		let double = FuncHandle::new(|args: &[Node]| {
			args.iter()
				.map(|arg| match arg.value() {
					Value::I64(value) => Node::from_parts(TypeId::INT, Value::I64(value * 2)),
					_ => arg.clone(),
				})
				.collect()
		});

		let arg = Node::new(&types, TypeId::INT, Value::I64(21)).expect("int node");
		let out = double.call(&[arg]);
		assert!(matches!(out[0].value(), Value::I64(42)));
		assert!(double.same(&double.clone()));
		assert!(!double.same(&FuncHandle::new(|_: &[Node]| Vec::new())));
	}
}
