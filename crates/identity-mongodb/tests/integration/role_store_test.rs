use identity_mongodb::store::{
    QueryableRoleStore, QueryableUserStore, RoleStore, UserEmailStore, UserRoleStore, UserStore,
};
use identity_mongodb::{CancellationToken, StoreError};
use identity_testing::TestMongo;
use identity_testing::fixture::{named_user, test_role, test_user};

#[tokio::test]
async fn should_find_role_by_normalized_name() {
    let Some(mongo) = TestMongo::from_env().await else {
        return;
    };
    let store = mongo.stores().role_store();
    let cancel = CancellationToken::new();
    let role = test_role("Admin");

    store.create(&role, &cancel).await.unwrap();

    let found = store.find_by_name("ADMIN", &cancel).await.unwrap();
    assert_eq!(found, Some(role));
    assert!(store.find_by_name("Admin", &cancel).await.unwrap().is_none());

    mongo.drop_database().await;
}

#[tokio::test]
async fn should_store_renamed_role_on_update() {
    let Some(mongo) = TestMongo::from_env().await else {
        return;
    };
    let store = mongo.stores().role_store();
    let cancel = CancellationToken::new();
    let mut role = test_role("Admin");
    store.create(&role, &cancel).await.unwrap();

    store
        .set_normalized_role_name(&mut role, Some("OWNER"), &cancel)
        .await
        .unwrap();
    store.update(&role, &cancel).await.unwrap();

    assert!(store.find_by_name("ADMIN", &cancel).await.unwrap().is_none());
    let renamed = store.find_by_name("OWNER", &cancel).await.unwrap().unwrap();
    assert_eq!(renamed.concurrency_stamp, role.concurrency_stamp);

    mongo.drop_database().await;
}

#[tokio::test]
async fn should_list_and_delete_roles() {
    let Some(mongo) = TestMongo::from_env().await else {
        return;
    };
    let store = mongo.stores().role_store();
    let cancel = CancellationToken::new();
    let admin = test_role("Admin");
    let editor = test_role("Editor");
    store.create(&admin, &cancel).await.unwrap();
    store.create(&editor, &cancel).await.unwrap();

    assert_eq!(store.roles(&cancel).await.unwrap().len(), 2);
    store.delete(&admin, &cancel).await.unwrap();
    assert_eq!(store.roles(&cancel).await.unwrap(), vec![editor]);

    mongo.drop_database().await;
}

#[tokio::test]
async fn should_resolve_roles_when_collection_is_shared_with_users() {
    let Some(mongo) = TestMongo::shared_from_env().await else {
        return;
    };
    let users = mongo.stores().user_store();
    let roles = mongo.stores().role_store();
    let cancel = CancellationToken::new();

    roles.create(&test_role("Admin"), &cancel).await.unwrap();
    let mut user = test_user();
    users.add_to_role(&mut user, "ADMIN", &cancel).await.unwrap();
    users.create(&user, &cancel).await.unwrap();

    let loaded = users
        .find_by_id(&user.id().to_hex(), &cancel)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.roles, vec!["ADMIN"]);

    mongo.drop_database().await;
}

#[tokio::test]
async fn should_not_treat_user_as_role_when_collection_is_shared() {
    let Some(mongo) = TestMongo::shared_from_env().await else {
        return;
    };
    let users = mongo.stores().user_store();
    let cancel = CancellationToken::new();
    let mut user = test_user();
    users.create(&user, &cancel).await.unwrap();

    let result = users.add_to_role(&mut user, "ALICE", &cancel).await;
    assert!(matches!(result, Err(StoreError::InvalidOperation(_))));
    assert!(user.roles.is_empty());

    mongo.drop_database().await;
}

#[tokio::test]
async fn should_not_find_role_as_user_when_collection_is_shared() {
    let Some(mongo) = TestMongo::shared_from_env().await else {
        return;
    };
    let users = mongo.stores().user_store();
    let roles = mongo.stores().role_store();
    let cancel = CancellationToken::new();
    roles.create(&test_role("Admin"), &cancel).await.unwrap();

    assert!(users.find_by_name("ADMIN", &cancel).await.unwrap().is_none());
    assert!(users.find_by_email("ADMIN", &cancel).await.unwrap().is_none());

    mongo.drop_database().await;
}

#[tokio::test]
async fn should_list_each_document_type_separately_when_collection_is_shared() {
    let Some(mongo) = TestMongo::shared_from_env().await else {
        return;
    };
    let users = mongo.stores().user_store();
    let roles = mongo.stores().role_store();
    let cancel = CancellationToken::new();
    let admin = test_role("Admin");
    let alice = test_user();
    roles.create(&admin, &cancel).await.unwrap();
    users.create(&alice, &cancel).await.unwrap();

    assert_eq!(roles.roles(&cancel).await.unwrap(), vec![admin]);
    assert_eq!(users.users(&cancel).await.unwrap(), vec![alice]);

    mongo.drop_database().await;
}

#[tokio::test]
async fn should_allow_user_and_role_with_same_name_when_collection_is_shared() {
    let Some(mongo) = TestMongo::shared_from_env().await else {
        return;
    };
    let users = mongo.stores().user_store();
    let roles = mongo.stores().role_store();
    let cancel = CancellationToken::new();
    let admin_user = named_user("Admin");
    let admin_role = test_role("Admin");

    users.create(&admin_user, &cancel).await.unwrap();
    roles.create(&admin_role, &cancel).await.unwrap();

    assert_eq!(
        users.find_by_name("ADMIN", &cancel).await.unwrap(),
        Some(admin_user)
    );
    assert_eq!(
        roles.find_by_name("ADMIN", &cancel).await.unwrap(),
        Some(admin_role)
    );

    mongo.drop_database().await;
}
