use larder_stock::{AdjustInput, Command, ConsumeLine, Query, RemoveInput, subscribe_list};
use temp_dir::TempDir;
use time::{Duration, macros::date};

mod helpers;

const DAY: time::Date = date!(2026 - 08 - 10);

async fn sync(state: &larder_shared::State<evento::Sqlite>) -> anyhow::Result<()> {
    subscribe_list()
        .data(state.read_db.clone())
        .unretry_oneshot(&state.executor)
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_stock_list_query() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state.clone());
    let query = Query(state.read_db.clone());

    let user = helpers::register_user(&state, "ana").await?;
    let flour = helpers::register_ingredient(&state, "Flour").await?;
    let milk = helpers::register_ingredient(&state, "Milk").await?;

    helpers::add(&command, &user, &flour, 500.0, DAY + Duration::days(10)).await?;
    helpers::add(&command, &user, &flour, 250.0, DAY + Duration::days(10)).await?;
    helpers::add(&command, &user, &milk, 1.0, DAY).await?;

    sync(&state).await?;

    let lots = query.for_user(&user).await?;
    assert_eq!(lots.len(), 2);
    // soonest expiration first
    assert_eq!(lots[0].ingredient_id, milk);
    assert_eq!(lots[0].name, "Milk");
    assert_eq!(lots[1].ingredient_id, flour);
    assert_eq!(lots[1].quantity, 750.0);

    let expiring = query.expiring(&user, DAY + Duration::days(3)).await?;
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].ingredient_id, milk);

    Ok(())
}

#[tokio::test]
async fn test_consumption_updates_the_read_model() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state.clone());
    let query = Query(state.read_db.clone());

    let user = helpers::register_user(&state, "ana").await?;
    let flour = helpers::register_ingredient(&state, "Flour").await?;
    let milk = helpers::register_ingredient(&state, "Milk").await?;

    helpers::add(&command, &user, &flour, 500.0, DAY).await?;
    helpers::add(&command, &user, &milk, 1.0, DAY).await?;

    command
        .consume(
            &user,
            vec![
                ConsumeLine {
                    ingredient_id: flour.to_owned(),
                    quantity: 100.0,
                },
                ConsumeLine {
                    ingredient_id: milk.to_owned(),
                    quantity: 1.0,
                },
            ],
        )
        .await?;

    sync(&state).await?;

    let lots = query.for_user(&user).await?;
    assert_eq!(lots.len(), 1);
    assert_eq!(lots[0].ingredient_id, flour);
    assert_eq!(lots[0].quantity, 400.0);

    Ok(())
}

#[tokio::test]
async fn test_adjust_and_remove_update_the_read_model() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state.clone());
    let query = Query(state.read_db.clone());

    let user = helpers::register_user(&state, "ana").await?;
    let flour = helpers::register_ingredient(&state, "Flour").await?;
    let milk = helpers::register_ingredient(&state, "Milk").await?;

    helpers::add(&command, &user, &flour, 500.0, DAY).await?;
    helpers::add(&command, &user, &milk, 1.0, DAY).await?;

    command
        .adjust(AdjustInput {
            user_id: user.to_owned(),
            ingredient_id: flour.to_owned(),
            expires_on: DAY,
            quantity: 300.0,
            new_expires_on: Some(DAY + Duration::days(5)),
        })
        .await?;

    command
        .remove(RemoveInput {
            user_id: user.to_owned(),
            ingredient_id: milk.to_owned(),
            expires_on: None,
        })
        .await?;

    sync(&state).await?;

    let lots = query.for_user(&user).await?;
    assert_eq!(lots.len(), 1);
    assert_eq!(lots[0].ingredient_id, flour);
    assert_eq!(lots[0].quantity, 300.0);
    assert_eq!(lots[0].expires_on, (DAY + Duration::days(5)).to_julian_day());

    Ok(())
}
