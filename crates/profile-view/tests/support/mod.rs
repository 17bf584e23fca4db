pub mod mock_users;
