use std::collections::BTreeSet;

use gcview_chart::core::SlotPool;
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Arena {
    next: u32,
    live: BTreeSet<u32>,
}

proptest! {
    #[test]
    fn pool_tracks_live_objects_across_resizes(sizes in prop::collection::vec(0usize..40, 1..20)) {
        let mut arena = Arena::default();
        let mut pool: SlotPool<u32> = SlotPool::new();

        for desired in sizes {
            let before: Vec<u32> = pool.as_slice().to_vec();
            pool.resize_with(
                desired,
                &mut arena,
                |arena, _| {
                    let id = arena.next;
                    arena.next += 1;
                    arena.live.insert(id);
                    id
                },
                |arena, id| {
                    arena.live.remove(&id);
                },
            );

            prop_assert_eq!(pool.len(), desired);
            prop_assert_eq!(arena.live.len(), desired);
            // Surviving slots keep their objects.
            let kept = before.len().min(desired);
            prop_assert_eq!(&pool.as_slice()[..kept], &before[..kept]);
            prop_assert!(pool.iter().all(|id| arena.live.contains(id)));
        }

        pool.clear_with(&mut arena, |arena, id| {
            arena.live.remove(&id);
        });
        prop_assert!(pool.is_empty());
        prop_assert!(arena.live.is_empty());
    }
}
