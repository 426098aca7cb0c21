use dashmap::DashMap;
use std::{
    any::{type_name, Any, TypeId},
    sync::{Arc, OnceLock},
};

type Descriptors = DashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Process-wide descriptor store. Entries are never removed.
static DESCRIPTORS: OnceLock<Descriptors> = OnceLock::new();

/// Returns the cached `D`, or builds and inserts it.
///
/// `build` runs while the entry's shard is write-locked, which is what keeps
/// racing callers from building twice. It must not call back into the cache.
pub(super) fn get_or_build<D>(build: impl FnOnce() -> D) -> Arc<D>
where
    D: Any + Send + Sync,
{
    let descriptors = DESCRIPTORS.get_or_init(DashMap::new);

    let entry = descriptors.entry(TypeId::of::<D>()).or_insert_with(|| {
        let descriptor = build();
        tracing::debug!(target: "rowbind::schema", descriptor = type_name::<D>(), "descriptor built");
        Arc::new(descriptor) as Arc<dyn Any + Send + Sync>
    });
    let descriptor = entry.value().clone();
    drop(entry);

    match descriptor.downcast::<D>() {
        Ok(descriptor) => descriptor,
        Err(_) => panic!(
            "descriptor cache entry for `{}` holds a different type",
            type_name::<D>()
        ),
    }
}
