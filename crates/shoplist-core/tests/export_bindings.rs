// ts-rs exports types marked with #[ts(export)] while tests run.
// Run with: cargo test -p shoplist-core export_bindings
// Bindings land in TS_RS_EXPORT_DIR, or ./bindings by default.

use shoplist_core::auth::Role;
use shoplist_core::models::{DeleteAck, ItemPatch, ShoppingItem, ShoppingList, User};
use ts_rs::{Config, TS};

#[test]
fn export_typescript_bindings() {
    let cfg = Config::from_env();
    let list = ShoppingList::decl(&cfg);
    assert!(list.contains("ownerId: ObjectId"));
    assert!(list.contains("createdAt: number"));

    assert!(ShoppingItem::decl(&cfg).contains("listId: ObjectId"));
    assert!(ItemPatch::decl(&cfg).contains("isDone?: boolean"));
    assert!(DeleteAck::decl(&cfg).contains("deletedId: string"));
    assert!(User::decl(&cfg).contains("name: string"));
    assert!(Role::decl(&cfg).contains("\"viewer\""));
}
